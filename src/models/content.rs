use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::content::{
    CategoryIcon as DomainCategoryIcon, NewProductVideo, NewSiteContent,
    ProductVideo as DomainProductVideo, SiteContent as DomainSiteContent,
};
use crate::domain::types::{
    ContentId, ContentTitle, ContentType, IconId, IconName, ImageUrl, MachineId, VideoId,
    VideoTitle, VideoUrl,
};
use crate::models::stored_optional;
use crate::repository::errors::RepositoryError;

/// Diesel model representing the `site_content` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::site_content)]
pub struct SiteContent {
    pub id: String,
    pub content_type: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub display_order: i32,
    pub active: bool,
    pub category: Option<String>,
    pub machines: String,
    pub metadata: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable/patchable form of [`SiteContent`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::site_content, treat_none_as_null = true)]
pub struct SiteContentRow {
    pub id: String,
    pub content_type: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub display_order: i32,
    pub active: bool,
    pub category: Option<String>,
    pub machines: String,
    pub metadata: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<SiteContent> for DomainSiteContent {
    type Error = RepositoryError;

    fn try_from(content: SiteContent) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContentId::new(content.id)?,
            content_type: ContentType::try_from(content.content_type)?,
            title: ContentTitle::new(content.title)?,
            description: content.description,
            image_url: stored_optional::<ImageUrl>(content.image_url)?,
            link: content.link,
            icon: content.icon,
            order: content.display_order,
            active: content.active,
            category: content.category,
            machines: serde_json::from_str(&content.machines)?,
            metadata: serde_json::from_str(&content.metadata)?,
            created_at: content.created_at,
            updated_at: content.updated_at,
        })
    }
}

impl SiteContentRow {
    pub fn from_new(id: &ContentId, content: &NewSiteContent) -> Result<Self, RepositoryError> {
        Ok(Self {
            id: id.to_string(),
            content_type: content.content_type.into(),
            title: content.title.to_string(),
            description: content.description.clone(),
            image_url: content.image_url.clone().map(String::from),
            link: content.link.clone(),
            icon: content.icon.clone(),
            display_order: content.order,
            active: content.active,
            category: content.category.clone(),
            machines: serde_json::to_string(&content.machines)?,
            metadata: serde_json::to_string(&content.metadata)?,
            created_at: content.created_at,
            updated_at: content.updated_at,
        })
    }

    pub fn from_content(content: &DomainSiteContent) -> Result<Self, RepositoryError> {
        Ok(Self {
            id: content.id.to_string(),
            content_type: content.content_type.into(),
            title: content.title.to_string(),
            description: content.description.clone(),
            image_url: content.image_url.clone().map(String::from),
            link: content.link.clone(),
            icon: content.icon.clone(),
            display_order: content.order,
            active: content.active,
            category: content.category.clone(),
            machines: serde_json::to_string(&content.machines)?,
            metadata: serde_json::to_string(&content.metadata)?,
            created_at: content.created_at,
            updated_at: content.updated_at,
        })
    }
}

/// Diesel model representing the `category_icons` table.
#[derive(Debug, Clone, Identifiable, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::category_icons, treat_none_as_null = true)]
pub struct CategoryIcon {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<CategoryIcon> for DomainCategoryIcon {
    type Error = RepositoryError;

    fn try_from(icon: CategoryIcon) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IconId::new(icon.id)?,
            name: IconName::new(icon.name)?,
            icon: icon.icon,
            image_url: stored_optional::<ImageUrl>(icon.image_url)?,
            order: icon.display_order,
            active: icon.active,
            updated_at: icon.updated_at,
        })
    }
}

impl From<&DomainCategoryIcon> for CategoryIcon {
    fn from(icon: &DomainCategoryIcon) -> Self {
        Self {
            id: icon.id.to_string(),
            name: icon.name.to_string(),
            icon: icon.icon.clone(),
            image_url: icon.image_url.clone().map(String::from),
            display_order: icon.order,
            active: icon.active,
            updated_at: icon.updated_at,
        }
    }
}

/// Diesel model representing the `product_videos` table.
#[derive(Debug, Clone, Identifiable, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::product_videos, treat_none_as_null = true)]
pub struct ProductVideo {
    pub id: String,
    pub product_id: String,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ProductVideo> for DomainProductVideo {
    type Error = RepositoryError;

    fn try_from(video: ProductVideo) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VideoId::new(video.id)?,
            product_id: MachineId::new(video.product_id)?,
            title: VideoTitle::new(video.title)?,
            video_url: VideoUrl::new(video.video_url)?,
            thumbnail_url: stored_optional::<ImageUrl>(video.thumbnail_url)?,
            order: video.display_order,
            created_at: video.created_at,
            updated_at: video.updated_at,
        })
    }
}

impl ProductVideo {
    pub fn from_new(id: &VideoId, video: &NewProductVideo) -> Self {
        Self {
            id: id.to_string(),
            product_id: video.product_id.to_string(),
            title: video.title.to_string(),
            video_url: video.video_url.to_string(),
            thumbnail_url: video.thumbnail_url.clone().map(String::from),
            display_order: video.order,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

impl From<&DomainProductVideo> for ProductVideo {
    fn from(video: &DomainProductVideo) -> Self {
        Self {
            id: video.id.to_string(),
            product_id: video.product_id.to_string(),
            title: video.title.to_string(),
            video_url: video.video_url.to_string(),
            thumbnail_url: video.thumbnail_url.clone().map(String::from),
            display_order: video.order,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}
