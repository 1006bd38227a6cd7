use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::taxonomy::InfoBag;
use crate::domain::types::{
    ContentId, ContentTitle, ContentType, IconId, IconName, ImageUrl, MachineId, VideoId,
    VideoTitle, VideoUrl,
};

/// Banner, category or phase shown on the public site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub id: ContentId,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: ContentTitle,
    pub description: Option<String>,
    pub image_url: Option<ImageUrl>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub order: i32,
    pub active: bool,
    pub category: Option<String>,
    /// Machine types (subcategory names) listed under this record.
    pub machines: Vec<String>,
    pub metadata: InfoBag,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`SiteContent`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewSiteContent {
    pub content_type: ContentType,
    pub title: ContentTitle,
    pub description: Option<String>,
    pub image_url: Option<ImageUrl>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub order: i32,
    pub active: bool,
    pub category: Option<String>,
    pub machines: Vec<String>,
    pub metadata: InfoBag,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`SiteContent`] record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentPatch {
    pub content_type: Option<ContentType>,
    pub title: Option<ContentTitle>,
    pub description: Option<String>,
    pub image_url: Option<ImageUrl>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
    pub category: Option<String>,
    pub machines: Option<Vec<String>>,
    pub metadata: Option<InfoBag>,
}

impl SiteContent {
    pub fn apply(mut self, patch: ContentPatch, updated_at: NaiveDateTime) -> Self {
        if let Some(content_type) = patch.content_type {
            self.content_type = content_type;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.image_url.is_some() {
            self.image_url = patch.image_url;
        }
        if patch.link.is_some() {
            self.link = patch.link;
        }
        if patch.icon.is_some() {
            self.icon = patch.icon;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        if patch.category.is_some() {
            self.category = patch.category;
        }
        if let Some(machines) = patch.machines {
            self.machines = machines;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
        self.updated_at = updated_at;
        self
    }
}

/// Icon shown next to a category in navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIcon {
    pub id: IconId,
    pub name: IconName,
    pub icon: String,
    pub image_url: Option<ImageUrl>,
    pub order: i32,
    pub active: bool,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`CategoryIcon`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconPatch {
    pub name: Option<IconName>,
    pub icon: Option<String>,
    pub image_url: Option<ImageUrl>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

impl CategoryIcon {
    pub fn apply(mut self, patch: IconPatch, updated_at: NaiveDateTime) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if patch.image_url.is_some() {
            self.image_url = patch.image_url;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        self.updated_at = updated_at;
        self
    }
}

/// Video attached to a machine listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVideo {
    pub id: VideoId,
    pub product_id: MachineId,
    pub title: VideoTitle,
    pub video_url: VideoUrl,
    pub thumbnail_url: Option<ImageUrl>,
    pub order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`ProductVideo`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductVideo {
    pub product_id: MachineId,
    pub title: VideoTitle,
    pub video_url: VideoUrl,
    pub thumbnail_url: Option<ImageUrl>,
    pub order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`ProductVideo`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoPatch {
    pub title: Option<VideoTitle>,
    pub video_url: Option<VideoUrl>,
    pub thumbnail_url: Option<ImageUrl>,
    pub order: Option<i32>,
}

impl ProductVideo {
    pub fn apply(mut self, patch: VideoPatch, updated_at: NaiveDateTime) -> Self {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(video_url) = patch.video_url {
            self.video_url = video_url;
        }
        if patch.thumbnail_url.is_some() {
            self.thumbnail_url = patch.thumbnail_url;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        self.updated_at = updated_at;
        self
    }
}
