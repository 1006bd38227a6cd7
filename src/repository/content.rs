use diesel::prelude::*;

use crate::domain::content::{
    CategoryIcon, NewProductVideo, NewSiteContent, ProductVideo, SiteContent,
};
use crate::domain::types::{ContentId, IconId, MachineId, VideoId};
use crate::models::content::{
    CategoryIcon as DbCategoryIcon, ProductVideo as DbProductVideo, SiteContent as DbSiteContent,
    SiteContentRow,
};
use crate::repository::{
    ContentListQuery, ContentReader, ContentWriter, DieselRepository, IconReader, IconWriter,
    RepositoryResult, VideoReader, VideoWriter, decode_rows, new_record_id,
};

impl ContentReader for DieselRepository {
    fn list_content(&self, query: ContentListQuery) -> RepositoryResult<Vec<SiteContent>> {
        use crate::schema::site_content;

        let mut conn = self.conn()?;

        let mut items = site_content::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(content_type) = query.content_type {
            items = items.filter(site_content::content_type.eq(content_type.as_str()));
        }
        if query.active_only {
            items = items.filter(site_content::active.eq(true));
        }

        let rows = items
            .order((
                site_content::display_order.asc(),
                site_content::created_at.asc(),
            ))
            .load::<DbSiteContent>(&mut conn)?;

        Ok(decode_rows(rows, "site_content", |row| row.id.clone()))
    }

    fn get_content_by_id(&self, id: &ContentId) -> RepositoryResult<Option<SiteContent>> {
        use crate::schema::site_content;

        let mut conn = self.conn()?;

        let content = site_content::table
            .filter(site_content::id.eq(id.as_str()))
            .first::<DbSiteContent>(&mut conn)
            .optional()?;

        content.map(TryInto::try_into).transpose()
    }
}

impl ContentWriter for DieselRepository {
    fn create_content(&self, content: &NewSiteContent) -> RepositoryResult<ContentId> {
        use crate::schema::site_content;

        let mut conn = self.conn()?;
        let id = ContentId::new(new_record_id())?;
        let row = SiteContentRow::from_new(&id, content)?;

        diesel::insert_into(site_content::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(id)
    }

    fn update_content(&self, content: &SiteContent) -> RepositoryResult<usize> {
        use crate::schema::site_content;

        let mut conn = self.conn()?;
        let row = SiteContentRow::from_content(content)?;

        let affected =
            diesel::update(site_content::table.filter(site_content::id.eq(content.id.as_str())))
                .set(&row)
                .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_content(&self, id: &ContentId) -> RepositoryResult<usize> {
        use crate::schema::site_content;

        let mut conn = self.conn()?;

        let affected = diesel::delete(site_content::table.filter(site_content::id.eq(id.as_str())))
            .execute(&mut conn)?;

        Ok(affected)
    }
}

impl IconReader for DieselRepository {
    fn list_icons(&self) -> RepositoryResult<Vec<CategoryIcon>> {
        use crate::schema::category_icons;

        let mut conn = self.conn()?;

        let rows = category_icons::table
            .order(category_icons::display_order.asc())
            .load::<DbCategoryIcon>(&mut conn)?;

        Ok(decode_rows(rows, "category_icons", |row| row.id.clone()))
    }

    fn get_icon_by_id(&self, id: &IconId) -> RepositoryResult<Option<CategoryIcon>> {
        use crate::schema::category_icons;

        let mut conn = self.conn()?;

        let icon = category_icons::table
            .filter(category_icons::id.eq(id.as_str()))
            .first::<DbCategoryIcon>(&mut conn)
            .optional()?;

        icon.map(TryInto::try_into).transpose()
    }
}

impl IconWriter for DieselRepository {
    fn update_icon(&self, icon: &CategoryIcon) -> RepositoryResult<usize> {
        use crate::schema::category_icons;

        let mut conn = self.conn()?;
        let row = DbCategoryIcon::from(icon);

        let affected =
            diesel::update(category_icons::table.filter(category_icons::id.eq(icon.id.as_str())))
                .set(&row)
                .execute(&mut conn)?;

        Ok(affected)
    }
}

impl VideoReader for DieselRepository {
    fn list_videos(&self, product_id: &MachineId) -> RepositoryResult<Vec<ProductVideo>> {
        use crate::schema::product_videos;

        let mut conn = self.conn()?;

        let rows = product_videos::table
            .filter(product_videos::product_id.eq(product_id.as_str()))
            .order((
                product_videos::display_order.asc(),
                product_videos::created_at.asc(),
            ))
            .load::<DbProductVideo>(&mut conn)?;

        Ok(decode_rows(rows, "product_videos", |row| row.id.clone()))
    }

    fn get_video_by_id(&self, id: &VideoId) -> RepositoryResult<Option<ProductVideo>> {
        use crate::schema::product_videos;

        let mut conn = self.conn()?;

        let video = product_videos::table
            .filter(product_videos::id.eq(id.as_str()))
            .first::<DbProductVideo>(&mut conn)
            .optional()?;

        video.map(TryInto::try_into).transpose()
    }
}

impl VideoWriter for DieselRepository {
    fn create_video(&self, video: &NewProductVideo) -> RepositoryResult<VideoId> {
        use crate::schema::product_videos;

        let mut conn = self.conn()?;
        let id = VideoId::new(new_record_id())?;
        let row = DbProductVideo::from_new(&id, video);

        diesel::insert_into(product_videos::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(id)
    }

    fn update_video(&self, video: &ProductVideo) -> RepositoryResult<usize> {
        use crate::schema::product_videos;

        let mut conn = self.conn()?;
        let row = DbProductVideo::from(video);

        let affected =
            diesel::update(product_videos::table.filter(product_videos::id.eq(video.id.as_str())))
                .set(&row)
                .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_video(&self, id: &VideoId) -> RepositoryResult<usize> {
        use crate::schema::product_videos;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(product_videos::table.filter(product_videos::id.eq(id.as_str())))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
