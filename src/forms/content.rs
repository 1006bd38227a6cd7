use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::content::{ContentPatch, IconPatch, NewSiteContent};
use crate::domain::taxonomy::InfoBag;
use crate::domain::types::{
    ContentTitle, ContentType, IconName, ImageUrl, TypeConstraintError,
};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AddContentForm {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    #[validate(range(min = 0))]
    pub order: Option<i32>,
    pub active: Option<bool>,
    pub category: Option<String>,
    pub machines: Vec<String>,
    pub metadata: InfoBag,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddContentFormPayload {
    pub content_type: Option<ContentType>,
    pub title: ContentTitle,
    pub description: Option<String>,
    pub image_url: Option<ImageUrl>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
    pub category: Option<String>,
    pub machines: Vec<String>,
    pub metadata: InfoBag,
}

impl AddContentFormPayload {
    /// Build the record to insert. `order` defaults to 0 and `active` to true.
    pub fn into_new_content(self, content_type: ContentType, now: NaiveDateTime) -> NewSiteContent {
        NewSiteContent {
            content_type,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            link: self.link,
            icon: self.icon,
            order: self.order.unwrap_or(0),
            active: self.active.unwrap_or(true),
            category: self.category,
            machines: self.machines,
            metadata: self.metadata,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddContentFormError {
    #[error("Add content form validation failed: {0}")]
    Validation(String),
    #[error("Add content form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddContentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddContentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddContentForm> for AddContentFormPayload {
    type Error = AddContentFormError;

    fn try_from(value: AddContentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            content_type: value.content_type.map(ContentType::try_from).transpose()?,
            title: ContentTitle::new(value.title)?,
            description: non_blank(value.description),
            image_url: non_blank(value.image_url).map(ImageUrl::new).transpose()?,
            link: non_blank(value.link),
            icon: non_blank(value.icon),
            order: value.order,
            active: value.active,
            category: non_blank(value.category),
            machines: value
                .machines
                .into_iter()
                .filter_map(|m| non_blank(Some(m)))
                .collect(),
            metadata: value.metadata,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateContentForm {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    #[validate(range(min = 0))]
    pub order: Option<i32>,
    pub active: Option<bool>,
    pub category: Option<String>,
    pub machines: Option<Vec<String>>,
    pub metadata: Option<InfoBag>,
}

#[derive(Debug, Error)]
pub enum UpdateContentFormError {
    #[error("Update content form validation failed: {0}")]
    Validation(String),
    #[error("Update content form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateContentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateContentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateContentForm> for ContentPatch {
    type Error = UpdateContentFormError;

    fn try_from(value: UpdateContentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            content_type: value.content_type.map(ContentType::try_from).transpose()?,
            title: value.title.map(ContentTitle::new).transpose()?,
            description: value.description,
            image_url: value.image_url.map(ImageUrl::new).transpose()?,
            link: value.link,
            icon: value.icon,
            order: value.order,
            active: value.active,
            category: value.category,
            machines: value.machines,
            metadata: value.metadata,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateIconForm {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub icon: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(range(min = 0))]
    pub order: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Debug, Error)]
pub enum UpdateIconFormError {
    #[error("Update icon form validation failed: {0}")]
    Validation(String),
    #[error("Update icon form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateIconFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateIconFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateIconForm> for IconPatch {
    type Error = UpdateIconFormError;

    fn try_from(value: UpdateIconForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: value.name.map(IconName::new).transpose()?,
            icon: value.icon,
            image_url: value.image_url.map(ImageUrl::new).transpose()?,
            order: value.order,
            active: value.active,
        })
    }
}
