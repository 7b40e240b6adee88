use crate::{
    Context, Error,
    constants::{colors, icon},
    functions::format::{format_number, pretty_message},
    services::backup,
};
use chrono::Utc;
use poise::serenity_prelude as serenity;

/// Database snapshots.
#[poise::command(
    slash_command,
    prefix_command,
    category = "Staff",
    interaction_context = "Guild",
    owners_only,
    ephemeral = true,
    subcommands("create", "list")
)]
pub async fn backup(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Snapshot the database now and prune old snapshots.
#[poise::command(slash_command, prefix_command, category = "Staff", owners_only, ephemeral = true)]
pub async fn create(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let data = ctx.data();
    let report = backup::create(&data.database, &data.backup_dir, data.backup_keep, Utc::now()).await?;

    let mut lines = vec![pretty_message(
        icon::FLOPPY,
        format!(
            "Wrote `{}` ({})",
            report.created.name,
            human_size(report.created.size)
        ),
    )];
    if !report.pruned.is_empty() {
        lines.push(pretty_message(
            icon::MINUS,
            format!("Pruned {}", report.pruned.join(", ")),
        ));
    }

    ctx.say(lines.join("\n")).await?;

    Ok(())
}

/// Show the snapshots on disk.
#[poise::command(slash_command, prefix_command, category = "Staff", owners_only, ephemeral = true)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let data = ctx.data();
    let snapshots = backup::list(&data.backup_dir).await?;

    let description = if snapshots.is_empty() {
        pretty_message(icon::MINUS, "No snapshots yet.")
    } else {
        snapshots
            .iter()
            .map(|snapshot| format!("`{}` · {}", snapshot.name, human_size(snapshot.size)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} Backups", icon::FLOPPY))
        .colour(colors::MOON)
        .description(description)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "{} · keeping the newest {}",
            data.backup_dir.display(),
            data.backup_keep
        )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

fn human_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    match bytes {
        size if size >= MIB => format!("{:.1} MiB", size as f64 / MIB as f64),
        size if size >= KIB => format!("{:.1} KiB", size as f64 / KIB as f64),
        size => format!("{} bytes", format_number(size as i64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_scale_units() {
        assert_eq!(human_size(512), "512 bytes");
        assert_eq!(human_size(2048), "2.0 KiB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MiB");
    }
}
