use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::organization_dto::{
    CreateOrganizationPayload, FollowerEntry, UpdateOrganizationPayload,
};
use crate::error::{Error, Result};
use crate::models::organization::Organization;

const ORGANIZATION_COLUMNS: &str = "id, name, logo, website, email_domain, phone, description, \
     mission, culture, founded_year, industry, company_size, hq_location, locations, \
     organization_type, hiring_contact_email, careers_page, social_links, office_photos, \
     cover_image, intro_video, awards, created_by, created_at, updated_at";

pub const MAX_ORGS_PER_USER: i64 = 4;

#[derive(Clone)]
pub struct OrganizationService {
    pool: PgPool,
}

impl OrganizationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        payload: CreateOrganizationPayload,
        created_by: Uuid,
    ) -> Result<Organization> {
        let owned: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM organizations WHERE created_by = $1")
                .bind(created_by)
                .fetch_one(&self.pool)
                .await?;
        if owned >= MAX_ORGS_PER_USER {
            return Err(Error::Forbidden(
                "You've reached the maximum number of organizations allowed".to_string(),
            ));
        }

        let hq_location = format!(
            "{}, {}",
            payload.headquarters.city.trim(),
            payload.headquarters.country.trim()
        );
        let social_links = payload
            .social_links
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        let organization = sqlx::query_as::<_, Organization>(&format!(
            r#"
            INSERT INTO organizations (
                name, logo, website, email_domain, phone, description, mission, culture,
                founded_year, industry, company_size, hq_location, locations,
                organization_type, hiring_contact_email, careers_page, social_links,
                office_photos, cover_image, intro_video, awards, created_by
            ) VALUES (
                $1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18,$19,$20,$21,$22
            )
            RETURNING {}
            "#,
            ORGANIZATION_COLUMNS
        ))
        .bind(payload.name.trim())
        .bind(payload.logo.as_deref())
        .bind(payload.website.as_deref())
        .bind(payload.email_domain.trim())
        .bind(payload.phone.as_deref())
        .bind(payload.description.trim())
        .bind(payload.mission.as_deref())
        .bind(payload.culture.as_deref())
        .bind(payload.founded_year)
        .bind(payload.industry.trim())
        .bind(payload.company_size)
        .bind(&hq_location)
        .bind(payload.locations.unwrap_or_default())
        .bind(payload.organization_type)
        .bind(payload.hiring_contact_email.trim())
        .bind(payload.careers_page.as_deref())
        .bind(social_links)
        .bind(payload.office_photos.unwrap_or_default())
        .bind(payload.cover_image.as_deref())
        .bind(payload.intro_video.as_deref())
        .bind(payload.awards.unwrap_or_default())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(organization)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Organization> {
        let organization = sqlx::query_as::<_, Organization>(&format!(
            "SELECT {} FROM organizations WHERE id = $1",
            ORGANIZATION_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(organization)
    }

    pub async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Organization>> {
        let organizations = sqlx::query_as::<_, Organization>(&format!(
            "SELECT {} FROM organizations WHERE created_by = $1 ORDER BY created_at DESC",
            ORGANIZATION_COLUMNS
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(organizations)
    }

    pub async fn list_public(&self) -> Result<Vec<Organization>> {
        let organizations = sqlx::query_as::<_, Organization>(&format!(
            "SELECT {} FROM organizations ORDER BY created_at DESC",
            ORGANIZATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(organizations)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: UpdateOrganizationPayload,
    ) -> Result<Organization> {
        let hq_location = payload
            .headquarters
            .as_ref()
            .map(|hq| format!("{}, {}", hq.city.trim(), hq.country.trim()));
        let social_links = payload
            .social_links
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        let organization = sqlx::query_as::<_, Organization>(&format!(
            r#"
            UPDATE organizations
            SET
                name = COALESCE($2, name),
                logo = COALESCE($3, logo),
                website = COALESCE($4, website),
                email_domain = COALESCE($5, email_domain),
                phone = COALESCE($6, phone),
                description = COALESCE($7, description),
                mission = COALESCE($8, mission),
                culture = COALESCE($9, culture),
                founded_year = COALESCE($10, founded_year),
                industry = COALESCE($11, industry),
                company_size = COALESCE($12, company_size),
                hq_location = COALESCE($13, hq_location),
                locations = COALESCE($14, locations),
                organization_type = COALESCE($15, organization_type),
                hiring_contact_email = COALESCE($16, hiring_contact_email),
                careers_page = COALESCE($17, careers_page),
                social_links = COALESCE($18, social_links),
                office_photos = COALESCE($19, office_photos),
                cover_image = COALESCE($20, cover_image),
                intro_video = COALESCE($21, intro_video),
                awards = COALESCE($22, awards),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ORGANIZATION_COLUMNS
        ))
        .bind(id)
        .bind(payload.name)
        .bind(payload.logo)
        .bind(payload.website)
        .bind(payload.email_domain)
        .bind(payload.phone)
        .bind(payload.description)
        .bind(payload.mission)
        .bind(payload.culture)
        .bind(payload.founded_year)
        .bind(payload.industry)
        .bind(payload.company_size)
        .bind(hq_location)
        .bind(payload.locations)
        .bind(payload.organization_type)
        .bind(payload.hiring_contact_email)
        .bind(payload.careers_page)
        .bind(social_links)
        .bind(payload.office_photos)
        .bind(payload.cover_image)
        .bind(payload.intro_video)
        .bind(payload.awards)
        .fetch_one(&self.pool)
        .await?;

        Ok(organization)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Idempotent follow: a second follow from the same user is a no-op.
    pub async fn follow(&self, organization_id: Uuid, user_id: Uuid) -> Result<()> {
        // 404 if the organization does not exist
        self.get_by_id(organization_id).await?;
        sqlx::query(
            r#"
            INSERT INTO organization_followers (organization_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (organization_id, user_id) DO NOTHING
            "#,
        )
        .bind(organization_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn followers(&self, organization_id: Uuid) -> Result<Vec<FollowerEntry>> {
        let followers = sqlx::query_as::<_, FollowerEntry>(
            r#"
            SELECT f.user_id, u.name, u.last_name, u.email, f.followed_at
            FROM organization_followers f
            JOIN users u ON u.id = f.user_id
            WHERE f.organization_id = $1
            ORDER BY f.followed_at DESC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(followers)
    }

    pub async fn is_following(&self, organization_id: Uuid, user_id: Uuid) -> Result<bool> {
        let found: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM organization_followers WHERE organization_id = $1 AND user_id = $2",
        )
        .bind(organization_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }

    pub async fn follower_count(&self, organization_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM organization_followers WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
