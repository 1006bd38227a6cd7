//! Apply the SQL schema, seed category content and normalize every stored
//! machine.

use std::process::ExitCode;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use dotenvy::dotenv;
use env_logger::Env;

use rental_catalog::db::establish_connection_pool;
use rental_catalog::models::config::AppConfig;
use rental_catalog::repository::DieselRepository;
use rental_catalog::services::migration::{
    FileReportSink, run_category_migration, run_machine_migration,
};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app_config = match AppConfig::load("config/default") {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match establish_connection_pool(&app_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            return ExitCode::FAILURE;
        }
    };

    match pool.get() {
        Ok(mut conn) => {
            if let Err(e) = conn.run_pending_migrations(MIGRATIONS) {
                log::error!("Failed to apply database migrations: {e}");
                return ExitCode::FAILURE;
            }
        }
        Err(e) => {
            log::error!("Failed to get database connection: {e}");
            return ExitCode::FAILURE;
        }
    }

    let repo = DieselRepository::new(pool);

    if let Err(e) = run_category_migration(&repo) {
        log::error!("Category migration failed: {e}");
        return ExitCode::FAILURE;
    }

    let sink = FileReportSink::new(&app_config.migration_log_path);
    match run_machine_migration(&repo, &sink) {
        Ok(report) => {
            log::info!(
                "Migration report written to {}",
                app_config.migration_log_path.display()
            );
            log::info!(
                "{} of {} machines migrated",
                report.migrated,
                report.total
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Machine migration failed: {e}");
            ExitCode::FAILURE
        }
    }
}
