/*

Copyright 2025 Lealt

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.

*/

use dotenvy::dotenv;

mod bot;
mod commands;
mod config;
mod constants;
mod database;
mod env;
mod error;
mod events;
mod functions;
mod game;
mod logging;
mod services;

pub use bot::{Context, Data};
pub use error::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();

    let _log_guard = logging::install(env::log_dir()?.as_deref());

    let token = env::discord_token()?;
    let settings = bot::Settings {
        owners: env::owner_ids()?,
        backup_dir: env::backup_dir()?,
        backup_keep: env::backup_keep()?,
    };
    let database = database::connect().await.map_err(|err| {
        tracing::error!(error = %err, "could not open the database");
        Box::new(err) as Error
    })?;

    let framework = bot::build_framework(database, settings);
    bot::run_client(token, config::gateway_intents(), framework).await
}
