use std::fs;
use std::path::Path;

use anyhow::Result;

use bankfeed::ledger;
use bankfeed::store::Store;

pub(crate) fn as_cli(args: &[String], store: &dyn Store) -> Result<()> {
    match args[1].as_str() {
        "import" => cli_import(&args[2..], store),
        "list" | "ls" => cli_list(store),
        "categorise" | "categorize" => cli_categorise(&args[2..], store),
        "export" => cli_export(&args[2..], store),
        "accounts" => cli_accounts(store),
        "account" => cli_account(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("bankfeed {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("bankfeed — bank statement imports, deduplicated");
    println!();
    println!("Usage: bankfeed <command>");
    println!();
    println!("Commands:");
    println!("  import <file.csv>             Import a statement export");
    println!("  list                          Print all transactions in display order");
    println!("  categorise <id> <category>    Overwrite the category of one transaction");
    println!("  export [path]                 Write transactions.csv (date, amount, category)");
    println!("  accounts                      List all accounts");
    println!("  account add <name>            Create an account");
    println!("  account rename <uuid> <name>  Rename an account");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_import(args: &[String], store: &dyn Store) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: bankfeed import <file.csv>");
    }
    let path = Path::new(&args[0]);
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let data = fs::read(path)?;
    let report = ledger::ingest(store, &data)?;

    println!(
        "Imported {} new transactions ({} duplicates skipped)",
        report.created, report.duplicates
    );
    if report.failed > 0 {
        println!("{} rows failed to persist; see the log", report.failed);
    }
    Ok(())
}

fn cli_list(store: &dyn Store) -> Result<()> {
    let txs = ledger::all_transactions(store)?;
    if txs.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<12} {:>12} {:>12}  {:<28} {:<16} ID",
        "Date", "Amount", "Balance", "Description", "Category"
    );
    println!("{}", "─".repeat(150));
    for tx in &txs {
        println!(
            "{:<12} {:>12} {:>12}  {:<28} {:<16} {}",
            tx.effective_date.to_string(),
            format!("{:.2}", tx.amount),
            format!("{:.2}", tx.balance),
            tx.description,
            tx.category,
            tx.id,
        );
    }
    Ok(())
}

fn cli_categorise(args: &[String], store: &dyn Store) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: bankfeed categorise <id> <category>");
    }
    let tx = ledger::set_category(store, &args[0], &args[1])?;
    println!("Categorised '{}' as '{}'", tx.description, tx.category);
    Ok(())
}

fn cli_export(args: &[String], store: &dyn Store) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| ledger::EXPORT_FILENAME.to_string());

    let file = fs::File::create(&output_path)?;
    let count = ledger::export_csv(store, file)?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {output_path}");
    }
    Ok(())
}

fn cli_accounts(store: &dyn Store) -> Result<()> {
    let accounts = ledger::all_accounts(store)?;
    if accounts.is_empty() {
        println!("No accounts");
        return Ok(());
    }

    println!("{:<38} Name", "UUID");
    println!("{}", "─".repeat(60));
    for account in &accounts {
        println!("{:<38} {}", account.uuid, account.name);
    }
    Ok(())
}

fn cli_account(args: &[String], store: &dyn Store) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("add") if args.len() >= 2 => {
            let account = ledger::create_account(store, &args[1])?;
            println!("Created account '{}' ({})", account.name, account.uuid);
            Ok(())
        }
        Some("rename") if args.len() >= 3 => {
            let account = ledger::rename_account(store, &args[1], &args[2])?;
            println!("Renamed account {} to '{}'", account.uuid, account.name);
            Ok(())
        }
        _ => anyhow::bail!("Usage: bankfeed account add <name> | account rename <uuid> <name>"),
    }
}
