use chrono::Utc;

use crate::domain::content::{
    CategoryIcon, ContentPatch, IconPatch, ProductVideo, SiteContent, VideoPatch,
};
use crate::domain::types::{ContentId, ContentType, IconId, MachineId, VideoId};
use crate::forms::content::AddContentFormPayload;
use crate::forms::videos::AddVideoFormPayload;
use crate::repository::{
    ContentListQuery, ContentReader, ContentWriter, IconReader, IconWriter, VideoReader,
    VideoWriter,
};
use crate::services::storage::ImageStore;

use super::{ServiceError, ServiceResult};

/// Active content of one type ordered by `order`.
pub fn get_content<R>(content_type: ContentType, repo: &R) -> ServiceResult<Vec<SiteContent>>
where
    R: ContentReader,
{
    repo.list_content(ContentListQuery::new(content_type).active())
        .map_err(|e| {
            log::error!("Failed to list {content_type} content: {e}");
            ServiceError::Internal
        })
}

pub fn create_content<R>(payload: AddContentFormPayload, repo: &R) -> ServiceResult<ContentId>
where
    R: ContentWriter,
{
    let Some(content_type) = payload.content_type else {
        return Err(ServiceError::Form("content type is required".to_string()));
    };
    insert_content(payload, content_type, repo)
}

fn insert_content<R>(
    payload: AddContentFormPayload,
    content_type: ContentType,
    repo: &R,
) -> ServiceResult<ContentId>
where
    R: ContentWriter,
{
    let content = payload.into_new_content(content_type, Utc::now().naive_utc());
    repo.create_content(&content).map_err(|e| {
        log::error!("Failed to create {content_type} content: {e}");
        ServiceError::Internal
    })
}

/// Apply `patch` to a stored record and refresh its `updated_at`.
pub fn update_content<R>(
    id: &ContentId,
    patch: ContentPatch,
    repo: &R,
) -> ServiceResult<SiteContent>
where
    R: ContentReader + ContentWriter,
{
    let existing = match repo.get_content_by_id(id) {
        Ok(Some(content)) => content,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get content {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let content = existing.apply(patch, Utc::now().naive_utc());
    match repo.update_content(&content) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(content),
        Err(e) => {
            log::error!("Failed to update content {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_content<R>(id: &ContentId, repo: &R) -> ServiceResult<()>
where
    R: ContentWriter,
{
    match repo.delete_content(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete content {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Active category records. A store failure yields an empty list.
pub fn get_categories<R>(repo: &R) -> Vec<SiteContent>
where
    R: ContentReader,
{
    match repo.list_content(ContentListQuery::new(ContentType::Category).active()) {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Vec::new()
        }
    }
}

/// Create a category record whatever type the payload carries.
pub fn create_category<R>(payload: AddContentFormPayload, repo: &R) -> ServiceResult<ContentId>
where
    R: ContentWriter,
{
    insert_content(payload, ContentType::Category, repo)
}

pub fn update_category<R>(
    id: &ContentId,
    mut patch: ContentPatch,
    repo: &R,
) -> ServiceResult<SiteContent>
where
    R: ContentReader + ContentWriter,
{
    patch.content_type = Some(ContentType::Category);
    update_content(id, patch, repo)
}

/// Delete a category and its image when the image lives in our storage.
///
/// A failed image deletion aborts the operation and keeps the record.
pub fn delete_category<R, S>(id: &ContentId, repo: &R, images: &S) -> ServiceResult<()>
where
    R: ContentReader + ContentWriter,
    S: ImageStore,
{
    let category = match repo.get_content_by_id(id) {
        Ok(Some(content)) => content,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if let Some(image_url) = &category.image_url {
        if images.is_managed(image_url.as_str()) {
            images.delete_object(image_url.as_str()).map_err(|e| {
                log::error!("Failed to delete image of category {id}: {e}");
                ServiceError::Internal
            })?;
        }
    }

    delete_content(id, repo)
}

pub fn list_icons<R>(repo: &R) -> ServiceResult<Vec<CategoryIcon>>
where
    R: IconReader,
{
    repo.list_icons().map_err(|e| {
        log::error!("Failed to list category icons: {e}");
        ServiceError::Internal
    })
}

pub fn update_icon<R>(id: &IconId, patch: IconPatch, repo: &R) -> ServiceResult<CategoryIcon>
where
    R: IconReader + IconWriter,
{
    let existing = match repo.get_icon_by_id(id) {
        Ok(Some(icon)) => icon,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category icon {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let icon = existing.apply(patch, Utc::now().naive_utc());
    match repo.update_icon(&icon) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(icon),
        Err(e) => {
            log::error!("Failed to update category icon {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_videos<R>(product_id: &MachineId, repo: &R) -> ServiceResult<Vec<ProductVideo>>
where
    R: VideoReader,
{
    repo.list_videos(product_id).map_err(|e| {
        log::error!("Failed to list videos of {product_id}: {e}");
        ServiceError::Internal
    })
}

pub fn add_video<R>(payload: AddVideoFormPayload, repo: &R) -> ServiceResult<VideoId>
where
    R: VideoWriter,
{
    let video = payload.into_new_video(Utc::now().naive_utc());
    repo.create_video(&video).map_err(|e| {
        log::error!("Failed to add video to {}: {e}", video.product_id);
        ServiceError::Internal
    })
}

pub fn update_video<R>(id: &VideoId, patch: VideoPatch, repo: &R) -> ServiceResult<ProductVideo>
where
    R: VideoReader + VideoWriter,
{
    let existing = match repo.get_video_by_id(id) {
        Ok(Some(video)) => video,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get video {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let video = existing.apply(patch, Utc::now().naive_utc());
    match repo.update_video(&video) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(video),
        Err(e) => {
            log::error!("Failed to update video {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_video<R>(id: &VideoId, repo: &R) -> ServiceResult<()>
where
    R: VideoWriter,
{
    match repo.delete_video(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete video {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::taxonomy::InfoBag;
    use crate::domain::types::{ContentTitle, IconName, ImageUrl, VideoTitle, VideoUrl};
    use crate::repository::test::TestRepository;
    use crate::services::storage::test::RecordingImageStore;

    fn at(seconds: i64) -> NaiveDateTime {
        chrono::DateTime::from_timestamp(seconds, 0)
            .unwrap()
            .naive_utc()
    }

    fn content(id: &str, content_type: ContentType, order: i32, active: bool) -> SiteContent {
        SiteContent {
            id: ContentId::new(id).unwrap(),
            content_type,
            title: ContentTitle::new(format!("Title {id}")).unwrap(),
            description: None,
            image_url: None,
            link: None,
            icon: None,
            order,
            active,
            category: None,
            machines: Vec::new(),
            metadata: InfoBag::new(),
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn payload(title: &str) -> AddContentFormPayload {
        AddContentFormPayload {
            content_type: None,
            title: ContentTitle::new(title).unwrap(),
            description: None,
            image_url: None,
            link: None,
            icon: None,
            order: None,
            active: None,
            category: None,
            machines: vec!["Betoneiras".into()],
            metadata: InfoBag::new(),
        }
    }

    fn video(id: &str, product: &str, order: i32) -> ProductVideo {
        ProductVideo {
            id: VideoId::new(id).unwrap(),
            product_id: MachineId::new(product).unwrap(),
            title: VideoTitle::new("Demo").unwrap(),
            video_url: VideoUrl::new("https://videos.example.com/demo.mp4").unwrap(),
            thumbnail_url: None,
            order,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    #[test]
    fn get_content_returns_active_records_in_order() {
        let repo = TestRepository::default().with_content(vec![
            content("c1", ContentType::Banner, 2, true),
            content("c2", ContentType::Banner, 1, true),
            content("c3", ContentType::Banner, 0, false),
            content("c4", ContentType::Phase, 0, true),
        ]);

        let banners = get_content(ContentType::Banner, &repo).unwrap();
        let ids: Vec<&str> = banners.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c1"]);
    }

    #[test]
    fn create_content_requires_type() {
        let repo = TestRepository::default();
        assert!(matches!(
            create_content(payload("Promo"), &repo),
            Err(ServiceError::Form(_))
        ));

        let banner = AddContentFormPayload {
            content_type: Some(ContentType::Banner),
            ..payload("Promo")
        };
        let id = create_content(banner, &repo).unwrap();
        let stored = repo.content();
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].content_type, ContentType::Banner);
    }

    #[test]
    fn create_category_forces_type_and_defaults() {
        let repo = TestRepository::default();
        let banner = AddContentFormPayload {
            content_type: Some(ContentType::Banner),
            ..payload("Fundação")
        };

        create_category(banner, &repo).unwrap();

        let categories = get_categories(&repo);
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].content_type, ContentType::Category);
        assert_eq!(categories[0].order, 0);
        assert!(categories[0].active);
        assert_eq!(categories[0].machines, vec!["Betoneiras".to_string()]);
    }

    #[test]
    fn update_category_keeps_category_type_and_refreshes_timestamp() {
        let repo = TestRepository::default()
            .with_content(vec![content("c1", ContentType::Category, 0, true)]);
        let patch = ContentPatch {
            content_type: Some(ContentType::Banner),
            order: Some(5),
            ..ContentPatch::default()
        };

        let updated = update_category(&ContentId::new("c1").unwrap(), patch, &repo).unwrap();

        assert_eq!(updated.content_type, ContentType::Category);
        assert_eq!(updated.order, 5);
        assert!(updated.updated_at > at(0));
        assert_eq!(repo.content()[0], updated);
    }

    #[test]
    fn update_missing_content_is_not_found() {
        let repo = TestRepository::default();
        let result = update_content(
            &ContentId::new("nope").unwrap(),
            ContentPatch::default(),
            &repo,
        );
        assert_eq!(result, Err(ServiceError::NotFound));
    }

    #[test]
    fn get_categories_swallows_store_errors() {
        struct BrokenRepo;
        impl ContentReader for BrokenRepo {
            fn list_content(
                &self,
                _query: ContentListQuery,
            ) -> crate::repository::RepositoryResult<Vec<SiteContent>> {
                Err(crate::repository::RepositoryError::NotFound)
            }
            fn get_content_by_id(
                &self,
                _id: &ContentId,
            ) -> crate::repository::RepositoryResult<Option<SiteContent>> {
                Err(crate::repository::RepositoryError::NotFound)
            }
        }

        assert!(get_categories(&BrokenRepo).is_empty());
        assert_eq!(
            get_content(ContentType::Category, &BrokenRepo),
            Err(ServiceError::Internal)
        );
    }

    #[test]
    fn delete_category_removes_managed_image_only() {
        let managed = SiteContent {
            image_url: Some(
                ImageUrl::new(format!("{}/content/a.png", RecordingImageStore::PREFIX)).unwrap(),
            ),
            ..content("c1", ContentType::Category, 0, true)
        };
        let foreign = SiteContent {
            image_url: Some(ImageUrl::new("https://images.unsplash.com/photo.jpg").unwrap()),
            ..content("c2", ContentType::Category, 1, true)
        };
        let repo = TestRepository::default().with_content(vec![managed, foreign]);
        let images = RecordingImageStore::new();

        delete_category(&ContentId::new("c1").unwrap(), &repo, &images).unwrap();
        delete_category(&ContentId::new("c2").unwrap(), &repo, &images).unwrap();

        assert!(repo.content().is_empty());
        assert_eq!(
            images.deleted.borrow().as_slice(),
            [format!("{}/content/a.png", RecordingImageStore::PREFIX)]
        );
    }

    #[test]
    fn delete_category_keeps_record_when_image_deletion_fails() {
        let managed = SiteContent {
            image_url: Some(
                ImageUrl::new(format!("{}/content/a.png", RecordingImageStore::PREFIX)).unwrap(),
            ),
            ..content("c1", ContentType::Category, 0, true)
        };
        let repo = TestRepository::default().with_content(vec![managed]);
        let images = RecordingImageStore::failing();

        assert_eq!(
            delete_category(&ContentId::new("c1").unwrap(), &repo, &images),
            Err(ServiceError::Internal)
        );
        assert_eq!(repo.content().len(), 1);
    }

    #[test]
    fn update_icon_applies_patch() {
        let icon = CategoryIcon {
            id: IconId::new("i1").unwrap(),
            name: IconName::new("Elevação").unwrap(),
            icon: "crane".into(),
            image_url: None,
            order: 0,
            active: true,
            updated_at: at(0),
        };
        let repo = TestRepository::default().with_icons(vec![icon]);
        let patch = IconPatch {
            active: Some(false),
            ..IconPatch::default()
        };

        let updated = update_icon(&IconId::new("i1").unwrap(), patch, &repo).unwrap();
        assert!(!updated.active);
        assert_eq!(list_icons(&repo).unwrap(), vec![updated]);
    }

    #[test]
    fn videos_are_listed_per_product_in_order() {
        let repo = TestRepository::default().with_videos(vec![
            video("v1", "m1", 2),
            video("v2", "m2", 0),
            video("v3", "m1", 1),
        ]);
        let product = MachineId::new("m1").unwrap();

        let ids: Vec<String> = list_videos(&product, &repo)
            .unwrap()
            .into_iter()
            .map(|v| v.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["v3", "v1"]);

        let added = add_video(
            AddVideoFormPayload {
                product_id: product.clone(),
                title: VideoTitle::new("Nova").unwrap(),
                video_url: VideoUrl::new("https://videos.example.com/nova.mp4").unwrap(),
                thumbnail_url: None,
                order: Some(0),
            },
            &repo,
        )
        .unwrap();
        assert_eq!(list_videos(&product, &repo).unwrap()[0].id, added);

        let renamed = update_video(
            &added,
            VideoPatch {
                title: Some(VideoTitle::new("Renomeado").unwrap()),
                ..VideoPatch::default()
            },
            &repo,
        )
        .unwrap();
        assert_eq!(renamed.title, "Renomeado");
        assert!(renamed.updated_at >= renamed.created_at);

        delete_video(&added, &repo).unwrap();
        assert_eq!(delete_video(&added, &repo), Err(ServiceError::NotFound));
        assert_eq!(list_videos(&product, &repo).unwrap().len(), 2);
    }
}
