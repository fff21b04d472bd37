use sqlx::PgPool;
use storyforge_core::types::DbId;

use crate::models::complex::ResidentialComplex;

/// Column list for `residential_complexes` queries.
const COLUMNS: &str = "id, name, developer_name, is_active, created_at";

/// Read access to residential complexes (admin CRUD is external).
pub struct ComplexRepo;

impl ComplexRepo {
    /// List active complexes offered to users at admission time.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ResidentialComplex>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM residential_complexes WHERE is_active ORDER BY name"
        );
        sqlx::query_as::<_, ResidentialComplex>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a complex by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ResidentialComplex>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM residential_complexes WHERE id = $1");
        sqlx::query_as::<_, ResidentialComplex>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
