//! One-shot backfills rewriting stored data into the current shape.

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::Utc;

use crate::catalog::{
    self, DEFAULT_CATEGORY_IMAGE_PHOTOGRAPHER, DEFAULT_CATEGORY_IMAGE_SOURCE,
    DEFAULT_CATEGORY_IMAGE_URL, MACHINE_CATEGORIES, WORK_PHASES,
};
use crate::domain::content::NewSiteContent;
use crate::domain::taxonomy::{InfoBag, InfoValue};
use crate::domain::types::{ContentTitle, ContentType, ImageUrl};
use crate::normalizer::machine_from_document;
use crate::repository::{
    ContentListQuery, ContentReader, ContentWriter, MachineReader, MachineWriter,
};

use super::{ServiceError, ServiceResult};

/// Destination of the plain-text migration report.
pub trait ReportSink {
    fn write_report(&self, report: &str) -> io::Result<()>;
}

/// Writes the report to a file, replacing previous content.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    path: PathBuf,
}

impl FileReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for FileReportSink {
    fn write_report(&self, report: &str) -> io::Result<()> {
        fs::write(&self.path, report)
    }
}

/// Outcome of a machine migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub total: usize,
    pub migrated: usize,
    pub errors: usize,
    pub logs: Vec<String>,
}

impl Display for MigrationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Migration Summary:")?;
        writeln!(f, "Total Machines: {}", self.total)?;
        writeln!(f, "Successfully Migrated: {}", self.migrated)?;
        writeln!(f, "Errors: {}", self.errors)?;
        write!(f, "\n--- Migration Logs ---\n")?;
        for line in &self.logs {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

fn emit<S: ReportSink>(sink: &S, report: &str) {
    if let Err(e) = sink.write_report(report) {
        log::error!("Failed to write migration report: {e}");
    }
}

/// Normalize every stored machine and write the results back at once.
///
/// Records that cannot be normalized are reported and skipped. The remaining
/// records are committed in a single transaction; when that fails nothing is
/// written and a failure report replaces the summary.
pub fn run_machine_migration<R, S>(repo: &R, sink: &S) -> ServiceResult<MigrationReport>
where
    R: MachineReader + MachineWriter,
    S: ReportSink,
{
    log::info!("Starting machine migration");

    let documents = match repo.list_machine_documents() {
        Ok(documents) => documents,
        Err(e) => {
            log::error!("Failed to list machines: {e}");
            emit(sink, &format!("Migration Failed: {e}"));
            return Err(ServiceError::Internal);
        }
    };

    let now = Utc::now().naive_utc();
    let mut report = MigrationReport {
        total: documents.len(),
        ..MigrationReport::default()
    };
    let mut migrated = Vec::with_capacity(documents.len());

    for document in documents {
        let document = match document {
            Ok(document) => document,
            Err(unreadable) => {
                let label = unreadable.label();
                log::warn!("Error reading machine {label}: {}", unreadable.error);
                report.errors += 1;
                report.logs.push(format!(
                    "Error migrating machine: {label}: {}",
                    unreadable.error
                ));
                continue;
            }
        };
        let label = document.label();
        match machine_from_document(document, now) {
            Ok(mut machine) => {
                machine.updated_at = now;
                migrated.push(machine);
                report.migrated += 1;
                report.logs.push(format!("Migrated machine: {label}"));
            }
            Err(e) => {
                log::warn!("Error migrating machine {label}: {e}");
                report.errors += 1;
                report
                    .logs
                    .push(format!("Error migrating machine: {label}: {e}"));
            }
        }
    }

    if let Err(e) = repo.update_machines(&migrated) {
        log::error!("Failed to commit machine migration: {e}");
        emit(sink, &format!("Migration Failed: {e}"));
        return Err(ServiceError::Internal);
    }

    emit(sink, &report.to_string());
    log::info!(
        "Machine migration completed: {} migrated, {} errors",
        report.migrated,
        report.errors
    );

    Ok(report)
}

fn text(value: &str) -> InfoValue {
    InfoValue::from(value)
}

fn image_credit() -> InfoValue {
    let mut credit = InfoBag::new();
    credit.insert("photographer".into(), text(DEFAULT_CATEGORY_IMAGE_PHOTOGRAPHER));
    credit.insert("source".into(), text(DEFAULT_CATEGORY_IMAGE_SOURCE));
    InfoValue::Map(credit)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Category records for the built-in catalog followed by one per work phase.
pub fn seed_categories() -> ServiceResult<Vec<NewSiteContent>> {
    let now = Utc::now().naive_utc();
    let default_image = ImageUrl::new(DEFAULT_CATEGORY_IMAGE_URL)?;
    let mut seeds = Vec::with_capacity(MACHINE_CATEGORIES.len() + WORK_PHASES.len());

    for category in MACHINE_CATEGORIES {
        let mut colors = InfoBag::new();
        colors.insert("primaryColor".into(), text(category.primary_color));
        colors.insert("secondaryColor".into(), text(category.secondary_color));
        colors.insert("textColor".into(), text(category.text_color));

        let mut metadata = InfoBag::new();
        metadata.insert("icon".into(), text(category.icon));
        metadata.insert("type".into(), text("main_category"));
        metadata.insert("colors".into(), InfoValue::Map(colors));

        seeds.push(NewSiteContent {
            content_type: ContentType::Category,
            title: ContentTitle::new(category.name)?,
            description: Some(category.description.to_string()),
            image_url: Some(ImageUrl::new(category.image_url)?),
            link: None,
            icon: Some(category.icon.to_string()),
            order: 0,
            active: true,
            category: Some(category.id.to_string()),
            machines: strings(&catalog::machine_types(category.id)),
            metadata,
            created_at: now,
            updated_at: now,
        });
    }

    for phase in WORK_PHASES {
        let machines = strings(phase.machines);
        let icon = catalog::phase_icon(phase.name);

        let mut metadata = InfoBag::new();
        metadata.insert("icon".into(), text(&icon));
        metadata.insert("type".into(), text("work_phase"));
        metadata.insert(
            "machines".into(),
            InfoValue::List(machines.iter().map(|m| text(m)).collect()),
        );
        metadata.insert("imageCredit".into(), image_credit());

        seeds.push(NewSiteContent {
            content_type: ContentType::Category,
            title: ContentTitle::new(phase.name)?,
            description: Some(format!("Fase de obra: {}", phase.name)),
            image_url: Some(default_image.clone()),
            link: None,
            icon: Some(icon),
            order: 0,
            active: true,
            category: None,
            machines,
            metadata,
            created_at: now,
            updated_at: now,
        });
    }

    for (index, seed) in seeds.iter_mut().enumerate() {
        seed.order = i32::try_from(index).map_err(|_| ServiceError::Internal)?;
    }

    Ok(seeds)
}

/// Seed category content unless some category record already exists.
///
/// Returns the number of records created.
pub fn run_category_migration<R>(repo: &R) -> ServiceResult<usize>
where
    R: ContentReader + ContentWriter,
{
    let existing = repo
        .list_content(ContentListQuery::new(ContentType::Category))
        .map_err(|e| {
            log::error!("Failed to list categories: {e}");
            ServiceError::Internal
        })?;

    if !existing.is_empty() {
        log::info!("Categories already exist. Skipping migration.");
        return Ok(0);
    }

    let seeds = seed_categories()?;
    for seed in &seeds {
        if let Err(e) = repo.create_content(seed) {
            log::error!("Category migration failed at {}: {e}", seed.title);
            return Err(ServiceError::Internal);
        }
    }

    log::info!("Migrated {} categories successfully.", seeds.len());
    Ok(seeds.len())
}
