use crate::db::{DbConnection, DbPool};
use crate::domain::content::{
    CategoryIcon, NewProductVideo, NewSiteContent, ProductVideo, SiteContent,
};
use crate::domain::machine::{Machine, MachineDocument, NewMachine};
use crate::domain::types::{
    CategoryName, ContentId, ContentType, IconId, MachineId, OwnerId, VideoId, WorkPhaseName,
};

pub mod content;
pub mod errors;
pub mod machine;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between callers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Fresh opaque identifier for a new record.
fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Convert loaded rows, logging and skipping the ones that cannot be decoded.
fn decode_rows<Row, T>(rows: Vec<Row>, table: &str, id: fn(&Row) -> String) -> Vec<T>
where
    T: TryFrom<Row, Error = RepositoryError>,
{
    rows.into_iter()
        .filter_map(|row| {
            let row_id = id(&row);
            match T::try_from(row) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("Skipping unreadable {table} row {row_id}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Query parameters used when listing machines.
#[derive(Debug, Clone, Default)]
pub struct MachineListQuery {
    /// Filter by owner.
    pub owner_id: Option<OwnerId>,
    /// Keep machines whose `categories` contain this name.
    pub category: Option<CategoryName>,
    /// Keep machines whose `work_phases` contain this name.
    pub work_phase: Option<WorkPhaseName>,
}

impl MachineListQuery {
    pub fn owner(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }
    pub fn category(mut self, category: CategoryName) -> Self {
        self.category = Some(category);
        self
    }
    pub fn work_phase(mut self, work_phase: WorkPhaseName) -> Self {
        self.work_phase = Some(work_phase);
        self
    }

    /// Whether `machine` passes every filter of this query.
    ///
    /// The Diesel repository filters by owner in SQL and only needs the
    /// taxonomy checks here; the in-memory repository relies on all of them.
    pub fn matches(&self, machine: &Machine) -> bool {
        let owner_matches = self
            .owner_id
            .as_ref()
            .map_or(true, |owner_id| machine.owner_id.as_ref() == Some(owner_id));
        let category_matches = self
            .category
            .as_ref()
            .map_or(true, |category| machine.taxonomy.has_category(category));
        let work_phase_matches = self
            .work_phase
            .as_ref()
            .map_or(true, |phase| machine.taxonomy.has_work_phase(phase));
        owner_matches && category_matches && work_phase_matches
    }
}

/// Stored machine row that could not be decoded.
#[derive(Debug)]
pub struct UnreadableMachine {
    /// Raw id of the row.
    pub id: String,
    /// Raw name of the row, if any.
    pub name: Option<String>,
    pub error: RepositoryError,
}

impl UnreadableMachine {
    /// Display label used in migration reports, e.g. `Betoneira (m1)`.
    pub fn label(&self) -> String {
        let name = self.name.as_deref().unwrap_or("<unnamed>");
        format!("{name} ({})", self.id)
    }
}

/// Query parameters for listing site content.
#[derive(Debug, Clone, Default)]
pub struct ContentListQuery {
    /// Restrict to one content type.
    pub content_type: Option<ContentType>,
    /// Skip records with `active = false`.
    pub active_only: bool,
}

impl ContentListQuery {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type: Some(content_type),
            active_only: false,
        }
    }
    pub fn active(mut self) -> Self {
        self.active_only = true;
        self
    }
}

/// Read-only operations for machine entities.
pub trait MachineReader {
    /// Retrieve a machine by its identifier, normalizing legacy rows on the way.
    fn get_machine_by_id(&self, id: &MachineId) -> RepositoryResult<Option<Machine>>;
    /// List machines matching the supplied query.
    fn list_machines(&self, query: MachineListQuery) -> RepositoryResult<Vec<Machine>>;
    /// List every stored machine exactly as stored. Rows that cannot be
    /// decoded are returned as [`UnreadableMachine`] instead of failing the
    /// whole listing.
    fn list_machine_documents(
        &self,
    ) -> RepositoryResult<Vec<Result<MachineDocument, UnreadableMachine>>>;
}

/// Write operations for machine entities.
pub trait MachineWriter {
    /// Persist a new machine and return its assigned id.
    fn create_machine(&self, machine: &NewMachine) -> RepositoryResult<MachineId>;
    /// Overwrite a stored machine.
    fn update_machine(&self, machine: &Machine) -> RepositoryResult<usize>;
    /// Overwrite several machines in one transaction. Either all rows are
    /// written or none.
    fn update_machines(&self, machines: &[Machine]) -> RepositoryResult<usize>;
    /// Delete a machine by id.
    fn delete_machine(&self, id: &MachineId) -> RepositoryResult<usize>;
}

/// Read-only operations for site content.
pub trait ContentReader {
    /// List content ordered by `order`, ties in insertion order.
    fn list_content(&self, query: ContentListQuery) -> RepositoryResult<Vec<SiteContent>>;
    /// Retrieve a content record by its identifier.
    fn get_content_by_id(&self, id: &ContentId) -> RepositoryResult<Option<SiteContent>>;
}

/// Write operations for site content.
pub trait ContentWriter {
    /// Persist new content and return its assigned id.
    fn create_content(&self, content: &NewSiteContent) -> RepositoryResult<ContentId>;
    /// Overwrite a stored content record.
    fn update_content(&self, content: &SiteContent) -> RepositoryResult<usize>;
    /// Delete a content record by id.
    fn delete_content(&self, id: &ContentId) -> RepositoryResult<usize>;
}

/// Read-only operations for category icons.
pub trait IconReader {
    /// List icons ordered by `order`.
    fn list_icons(&self) -> RepositoryResult<Vec<CategoryIcon>>;
    fn get_icon_by_id(&self, id: &IconId) -> RepositoryResult<Option<CategoryIcon>>;
}

/// Write operations for category icons.
pub trait IconWriter {
    fn update_icon(&self, icon: &CategoryIcon) -> RepositoryResult<usize>;
}

/// Read-only operations for product videos.
pub trait VideoReader {
    /// List the videos of one machine ordered by `order`.
    fn list_videos(&self, product_id: &MachineId) -> RepositoryResult<Vec<ProductVideo>>;
    fn get_video_by_id(&self, id: &VideoId) -> RepositoryResult<Option<ProductVideo>>;
}

/// Write operations for product videos.
pub trait VideoWriter {
    fn create_video(&self, video: &NewProductVideo) -> RepositoryResult<VideoId>;
    fn update_video(&self, video: &ProductVideo) -> RepositoryResult<usize>;
    fn delete_video(&self, id: &VideoId) -> RepositoryResult<usize>;
}
