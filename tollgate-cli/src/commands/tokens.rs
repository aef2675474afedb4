//! Tokens command - list API tokens with a selection preview.

use anyhow::Result;
use clap::Args;
use tollgate_core::RowSelection;
use tollgate_fetch::{ConsoleApi, TokenPage};

use super::{build_client, load_store, print_header};
use crate::output::{JsonFormatter, TextFormatter, TokenOutput, TokensOutput};
use crate::{Cli, OutputFormat};

/// Arguments for the tokens command.
#[derive(Args)]
pub struct TokensArgs {
    /// Page to show (1-based).
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Tokens per page.
    #[arg(long, default_value = "10")]
    pub page_size: u32,

    /// Token ids to mark as selected (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<i64>,

    /// Toggle every token on the shown page.
    #[arg(long)]
    pub select_page: bool,
}

/// Runs the tokens command.
pub async fn run(args: &TokensArgs, cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    let client = build_client(&store.get().await, cli)?;

    let page = client.tokens(args.page.max(1), args.page_size.max(1)).await?;

    let mut selection: RowSelection<i64> = args.select.iter().copied().collect();
    if args.select_page {
        selection.toggle_page(&page.items);
    }
    let output = tokens_output(&page, &selection);

    match cli.format {
        OutputFormat::Text => {
            print_header("API Tokens");
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_tokens(&output));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

fn tokens_output(page: &TokenPage, selection: &RowSelection<i64>) -> TokensOutput {
    TokensOutput {
        page: page.page,
        page_size: page.page_size,
        total: page.total,
        page_state: selection.page_state(&page.items),
        selected_on_page: selection.count_on_page(&page.items),
        selected: selection.iter().copied().collect(),
        items: page
            .items
            .iter()
            .map(|token| TokenOutput::from_record(token, selection.contains(&token.id)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_core::{PageSelectionState, TokenRecord};

    fn page(ids: &[i64]) -> TokenPage {
        TokenPage {
            items: ids.iter().map(|id| TokenRecord::new(*id, format!("t{id}"))).collect(),
            total: 25,
            page: 2,
            page_size: 10,
        }
    }

    #[test]
    fn test_selection_from_other_page_kept() {
        let page = page(&[11, 12, 13]);
        let mut selection: RowSelection<i64> = [3, 12].into_iter().collect();

        let output = tokens_output(&page, &selection);
        assert_eq!(output.page_state, PageSelectionState::Partial);
        assert_eq!(output.selected_on_page, 1);
        assert_eq!(output.selected, vec![3, 12]);

        selection.toggle_page(&page.items);
        let output = tokens_output(&page, &selection);
        assert_eq!(output.page_state, PageSelectionState::All);
        assert_eq!(output.selected, vec![3, 11, 12, 13]);
        assert!(output.items.iter().all(|t| t.selected));
    }
}
