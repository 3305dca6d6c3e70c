//! Balance command - print the provider wallet's address and balance

use std::io;

use anyhow::Result;

use super::get_context;
use crate::ProviderArgs;

pub async fn run(args: &ProviderArgs, program: &str, json: bool) -> Result<()> {
    let ctx = get_context(args)?;

    if json {
        let report = ctx.balance_service.fetch(program).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Address is written before the balance query goes out
    let mut stdout = io::stdout().lock();
    ctx.balance_service.report(program, &mut stdout).await?;
    Ok(())
}
