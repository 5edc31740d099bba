use super::super::args::PromptArgs;
use crate::exit_codes::SUCCESS;
use ticket_audit_core::{build_prompt, load_rules, load_tickets};

pub(crate) fn run(args: PromptArgs) -> anyhow::Result<i32> {
    let rules = load_rules(&args.inputs.rules)?;
    let tickets = load_tickets(&args.inputs.tickets)?;
    let prompt = build_prompt(&rules, &tickets);

    println!("=== system ===");
    println!("{}", prompt.system);
    println!();
    println!("=== user ===");
    println!("{}", prompt.user);
    Ok(SUCCESS)
}
