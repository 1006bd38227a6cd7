use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::content::{NewProductVideo, VideoPatch};
use crate::domain::types::{ImageUrl, MachineId, TypeConstraintError, VideoTitle, VideoUrl};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AddVideoForm {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(url)]
    pub video_url: String,
    #[validate(url)]
    pub thumbnail_url: Option<String>,
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddVideoFormPayload {
    pub product_id: MachineId,
    pub title: VideoTitle,
    pub video_url: VideoUrl,
    pub thumbnail_url: Option<ImageUrl>,
    pub order: Option<i32>,
}

impl AddVideoFormPayload {
    pub fn into_new_video(self, now: NaiveDateTime) -> NewProductVideo {
        NewProductVideo {
            product_id: self.product_id,
            title: self.title,
            video_url: self.video_url,
            thumbnail_url: self.thumbnail_url,
            order: self.order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddVideoFormError {
    #[error("Add video form validation failed: {0}")]
    Validation(String),
    #[error("Add video form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddVideoFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddVideoFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddVideoForm> for AddVideoFormPayload {
    type Error = AddVideoFormError;

    fn try_from(value: AddVideoForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            product_id: MachineId::new(value.product_id)?,
            title: VideoTitle::new(value.title)?,
            video_url: VideoUrl::new(value.video_url)?,
            thumbnail_url: value.thumbnail_url.map(ImageUrl::new).transpose()?,
            order: value.order,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateVideoForm {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
    #[validate(url)]
    pub thumbnail_url: Option<String>,
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

#[derive(Debug, Error)]
pub enum UpdateVideoFormError {
    #[error("Update video form validation failed: {0}")]
    Validation(String),
    #[error("Update video form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateVideoFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateVideoFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateVideoForm> for VideoPatch {
    type Error = UpdateVideoFormError;

    fn try_from(value: UpdateVideoForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            title: value.title.map(VideoTitle::new).transpose()?,
            video_url: value.video_url.map(VideoUrl::new).transpose()?,
            thumbnail_url: value.thumbnail_url.map(ImageUrl::new).transpose()?,
            order: value.order,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn add_video_form_builds_payload() {
        let form: AddVideoForm = serde_json::from_value(serde_json::json!({
            "productId": "m1",
            "title": "Operação da betoneira",
            "videoUrl": "https://videos.example.com/betoneira.mp4"
        }))
        .unwrap();

        let payload = AddVideoFormPayload::try_from(form).unwrap();
        assert_eq!(payload.product_id, "m1");
        let video = payload.into_new_video(Utc::now().naive_utc());
        assert_eq!(video.order, 0);
        assert_eq!(video.thumbnail_url, None);
    }

    #[test]
    fn add_video_form_requires_valid_url() {
        let form = AddVideoForm {
            product_id: "m1".into(),
            title: "Demo".into(),
            video_url: "betoneira.mp4".into(),
            ..AddVideoForm::default()
        };
        assert!(matches!(
            AddVideoFormPayload::try_from(form),
            Err(AddVideoFormError::Validation(_))
        ));
    }

    #[test]
    fn update_video_form_rejects_negative_order() {
        let form = UpdateVideoForm {
            order: Some(-1),
            ..UpdateVideoForm::default()
        };
        assert!(VideoPatch::try_from(form).is_err());

        let ok = UpdateVideoForm {
            order: Some(3),
            ..UpdateVideoForm::default()
        };
        assert_eq!(
            VideoPatch::try_from(ok).unwrap(),
            VideoPatch {
                order: Some(3),
                ..VideoPatch::default()
            }
        );
    }
}
