//! Call group commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use gc_db::NewGroup;

use super::admin_context;
use crate::output;

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a group
    Create(CreateGroupArgs),

    /// List all groups
    List,

    /// Add a person to a group
    AddMember(AddMemberArgs),
}

#[derive(Args)]
pub struct CreateGroupArgs {
    /// Group name
    #[arg(short, long)]
    pub name: String,

    /// BSD constituent group id
    #[arg(long)]
    pub bsd_id: Option<i64>,

    /// Local id of a member (repeatable)
    #[arg(long = "person-id")]
    pub person_ids: Vec<i64>,
}

#[derive(Args)]
pub struct AddMemberArgs {
    /// Group id
    pub group_id: i64,

    /// Person id
    pub person_id: i64,
}

pub async fn execute(cmd: GroupCommands, redis_url: &str) -> Result<()> {
    let ctx = admin_context(redis_url).await?;

    match cmd {
        GroupCommands::Create(args) => {
            let group = gc_core::group::create_group(
                &ctx,
                &NewGroup {
                    name: Some(args.name),
                    bsd_id: args.bsd_id,
                    person_ids: args.person_ids,
                },
            )
            .await?;

            println!(
                "{} Created group: {} ({})",
                "✓".green().bold(),
                group.name.as_deref().unwrap_or("-").cyan(),
                group.id.to_string().dimmed()
            );
        }

        GroupCommands::List => {
            let groups = gc_core::group::list_groups(&ctx).await?;
            output::print_groups_table(&groups);
        }

        GroupCommands::AddMember(args) => {
            let group = gc_core::group::add_member(&ctx, args.group_id, args.person_id).await?;
            println!(
                "{} Group {} now has {} member(s)",
                "✓".green().bold(),
                group.id.to_string().cyan(),
                group.person_ids.len()
            );
        }
    }

    Ok(())
}
