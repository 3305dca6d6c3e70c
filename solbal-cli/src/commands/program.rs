//! Program command - inspect programs registered in the workspace

use anyhow::Result;
use colored::Colorize;
use solbal_core::services::ProgramReport;

use super::get_context;
use crate::output;
use crate::ProviderArgs;

pub async fn run(
    args: &ProviderArgs,
    name: &str,
    list: bool,
    check_deployed: bool,
    json: bool,
) -> Result<()> {
    let ctx = get_context(args)?;

    if list {
        let names = ctx.program_service.list()?;
        if json {
            println!("{}", serde_json::to_string_pretty(&names)?);
        } else if names.is_empty() {
            output::warning(&format!(
                "No programs registered for {} in {}",
                ctx.workspace.cluster(),
                ctx.workspace.root().display()
            ));
        } else {
            for name in names {
                println!("{}", name);
            }
        }
        return Ok(());
    }

    let report = if check_deployed {
        ctx.program_service
            .describe_deployed(name, ctx.provider.connection().as_ref(), ctx.config.commitment)
            .await?
    } else {
        ctx.program_service.describe(name)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);

    if let Some(deployment) = &report.deployment {
        if !deployment.exists {
            anyhow::bail!("program {} is not deployed on {}", report.handle.program_id, ctx.config.cluster);
        }
        if !deployment.executable {
            anyhow::bail!("account {} is not executable", report.handle.program_id);
        }
    }

    Ok(())
}

fn print_report(report: &ProgramReport) {
    let handle = &report.handle;
    let mut table = output::create_table();
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Name".to_string(), handle.name.clone()]);
    table.add_row(vec!["Program ID".to_string(), handle.program_id.to_string()]);
    table.add_row(vec!["Cluster".to_string(), handle.cluster.clone()]);

    if let Some(version) = handle.idl.program_version() {
        table.add_row(vec!["Version".to_string(), version.to_string()]);
    }
    for ix in &handle.idl.instructions {
        table.add_row(vec![
            "Instruction".to_string(),
            format!("{} ({} accounts, {} args)", ix.name, ix.accounts.len(), ix.args.len()),
        ]);
    }

    if let Some(deployment) = &report.deployment {
        let status = match (deployment.exists, deployment.executable) {
            (true, true) => "deployed".green().to_string(),
            (true, false) => "not executable".yellow().to_string(),
            (false, _) => "not found".red().to_string(),
        };
        table.add_row(vec!["Deployment".to_string(), status]);
        if let Some(owner) = &deployment.owner {
            table.add_row(vec!["Owner".to_string(), owner.to_string()]);
        }
        if let Some(lamports) = deployment.lamports {
            table.add_row(vec!["Rent".to_string(), format!("{} SOL", lamports.to_sol())]);
        }
    }

    println!("{}", table);
}
