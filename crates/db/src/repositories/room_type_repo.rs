use sqlx::PgPool;
use storyforge_core::types::DbId;

use crate::models::room_type::RoomType;

/// Column list for `room_types` queries.
const COLUMNS: &str = "id, complex_id, label, rooms, created_at";

/// Read access to room types (admin CRUD is external).
pub struct RoomTypeRepo;

impl RoomTypeRepo {
    /// List room types of a complex, smallest first.
    pub async fn list_by_complex(
        pool: &PgPool,
        complex_id: DbId,
    ) -> Result<Vec<RoomType>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM room_types WHERE complex_id = $1 ORDER BY rooms ASC");
        sqlx::query_as::<_, RoomType>(&query)
            .bind(complex_id)
            .fetch_all(pool)
            .await
    }

    /// Find a room type only if it belongs to the given complex.
    ///
    /// Admission uses this to reject mismatched (complex, room type) pairs.
    pub async fn find_for_complex(
        pool: &PgPool,
        id: DbId,
        complex_id: DbId,
    ) -> Result<Option<RoomType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM room_types WHERE id = $1 AND complex_id = $2");
        sqlx::query_as::<_, RoomType>(&query)
            .bind(id)
            .bind(complex_id)
            .fetch_optional(pool)
            .await
    }
}
