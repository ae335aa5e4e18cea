mod advice;
mod journal;
mod log;
mod posture;
mod sessions;

use crate::cli::{Commands, JournalAction};
use crate::context::CommandContext;
use crate::error::Result;

pub async fn dispatch(command: Commands, ctx: &CommandContext) -> Result<()> {
	match command {
		Commands::Posture { user, weight, goal, experience, output_dir } => {
			posture::execute(
				posture::PostureOptions {
					user,
					weight,
					goal,
					experience,
					output_dir,
				},
				ctx,
			)
			.await
		}
		Commands::Log { user, exercises } => log::execute(&user, &exercises, ctx).await,
		Commands::Advice { user, limit } => advice::execute(&user, limit, ctx).await,
		Commands::Sessions { limit, user, format } => sessions::execute(limit, user.as_deref(), format, ctx).await,
		Commands::Journal { action } => match action {
			JournalAction::Add { content, user } => journal::add(&content, user, ctx).await,
			JournalAction::List { limit } => journal::list(limit, ctx).await,
		},
	}
}
