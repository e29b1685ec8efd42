//! `control` command: send a lifecycle action to a job.
//!
//! Invariants:
//! - `setttl`, `setpriority` and `setworkloadpool` require their matching flag.
//! - Flags that do not belong to the chosen action are rejected, not ignored.

use anyhow::{Context, Result, bail};
use splunk_search_client::{CancellationToken, ControlCommand, SearchJob, SplunkClient};

use crate::cancellation::cancellable;

pub struct ControlArgs {
    pub action: String,
    pub ttl: Option<u64>,
    pub priority: Option<u8>,
    pub workload_pool: Option<String>,
}

pub async fn run(
    client: &SplunkClient,
    sid: &str,
    args: ControlArgs,
    cancel: &CancellationToken,
) -> Result<()> {
    let command: ControlCommand = args.action.parse()?;
    validate(command, &args)?;

    let job = SearchJob::attach(client.clone(), sid);
    let request = async {
        match (args.ttl, args.priority, args.workload_pool.as_deref()) {
            (Some(ttl), _, _) => job.set_ttl(ttl).await,
            (_, Some(priority), _) => job.set_priority(priority).await,
            (_, _, Some(pool)) => job.set_workload_pool(pool).await,
            _ => job.control(command).await,
        }
    };

    cancellable(cancel, request)
        .await
        .with_context(|| format!("Failed to send '{command}' to job {sid}"))?;

    println!("Sent '{}' to job {}", command, sid);
    Ok(())
}

fn validate(command: ControlCommand, args: &ControlArgs) -> Result<()> {
    let given: Vec<&str> = [
        args.ttl.map(|_| "ttl"),
        args.priority.map(|_| "priority"),
        args.workload_pool.as_ref().map(|_| "workload_pool"),
    ]
    .into_iter()
    .flatten()
    .collect();

    match command.argument_name() {
        Some(required) if given == [required] => Ok(()),
        Some(required) => bail!(
            "'{command}' requires --{} and no other option",
            required.replace('_', "-")
        ),
        None if given.is_empty() => Ok(()),
        None => bail!("'{command}' takes no options, got --{}", given[0].replace('_', "-")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(ttl: Option<u64>, priority: Option<u8>, pool: Option<&str>) -> ControlArgs {
        ControlArgs {
            action: String::new(),
            ttl,
            priority,
            workload_pool: pool.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_argument_requirements() {
        assert!(validate(ControlCommand::SetTtl, &args(Some(60), None, None)).is_ok());
        assert!(validate(ControlCommand::SetTtl, &args(None, None, None)).is_err());
        assert!(validate(ControlCommand::SetTtl, &args(Some(60), Some(1), None)).is_err());
        assert!(validate(ControlCommand::SetPriority, &args(None, Some(3), None)).is_ok());
        assert!(
            validate(ControlCommand::SetWorkloadPool, &args(None, None, Some("fast"))).is_ok()
        );
        assert!(validate(ControlCommand::Cancel, &args(None, None, None)).is_ok());
        assert!(validate(ControlCommand::Cancel, &args(Some(1), None, None)).is_err());
    }
}
