//! Repository for the `games` table and its collection tables.

use std::collections::HashMap;

use gamelib_core::game::{Game, GameFields};
use gamelib_core::search::contains_pattern;
use gamelib_core::types::DbId;
use sqlx::PgPool;

use crate::models::game::{Collection, CollectionItems, GameRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, release_date, rating, cover_image_url, \
    banner_image_url, trailer_url, more_info_url, sort_order";

/// Catalog order. Nulls last is PostgreSQL's default for ASC; spelled out
/// so it cannot drift from the in-memory store.
const CATALOG_ORDER: &str = "ORDER BY sort_order ASC NULLS LAST, id ASC";

/// Provides CRUD operations for games and their collections.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game and its collections in one transaction.
    ///
    /// `sort_order` is the already-converted column value.
    pub async fn create(
        pool: &PgPool,
        input: &GameFields,
        sort_order: Option<i32>,
    ) -> Result<Game, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO games \
                (title, description, release_date, rating, cover_image_url, \
                 banner_image_url, trailer_url, more_info_url, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, GameRow>(&insert_query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.release_date)
            .bind(input.rating)
            .bind(&input.cover_image_url)
            .bind(&input.banner_image_url)
            .bind(&input.trailer_url)
            .bind(&input.more_info_url)
            .bind(sort_order)
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_collections_inner(&mut tx, row.id, input).await?;

        tx.commit().await?;
        Ok(row.into_game(
            input.genres.clone(),
            input.platforms.clone(),
            input.screenshots.clone(),
        ))
    }

    /// Overwrite every column and collection of a game.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &GameFields,
        sort_order: Option<i32>,
    ) -> Result<Option<Game>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE games SET \
                title = $2, \
                description = $3, \
                release_date = $4, \
                rating = $5, \
                cover_image_url = $6, \
                banner_image_url = $7, \
                trailer_url = $8, \
                more_info_url = $9, \
                sort_order = $10 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, GameRow>(&update_query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.release_date)
            .bind(input.rating)
            .bind(&input.cover_image_url)
            .bind(&input.banner_image_url)
            .bind(&input.trailer_url)
            .bind(&input.more_info_url)
            .bind(sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Self::replace_collections_inner(&mut tx, id, input).await?;

        tx.commit().await?;
        Ok(Some(row.into_game(
            input.genres.clone(),
            input.platforms.clone(),
            input.screenshots.clone(),
        )))
    }

    /// Find a game by its internal ID, collections included.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        let row = sqlx::query_as::<_, GameRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => Ok(Self::with_collections(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM games WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a game. Collection rows go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM games")
            .fetch_one(pool)
            .await
    }

    /// Write only `sort_order`. Returns `true` if the game exists.
    pub async fn set_sort_order(
        pool: &PgPool,
        id: DbId,
        sort_order: Option<i32>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE games SET sort_order = $2 WHERE id = $1")
            .bind(id)
            .bind(sort_order)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All games in catalog order.
    pub async fn list_ordered(pool: &PgPool) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games {CATALOG_ORDER}");
        let rows = sqlx::query_as::<_, GameRow>(&query)
            .fetch_all(pool)
            .await?;
        Self::with_collections(pool, rows).await
    }

    /// Games whose title contains `query` (case-insensitive, literal), in catalog order.
    pub async fn search_title(pool: &PgPool, query: &str) -> Result<Vec<Game>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM games \
             WHERE title ILIKE $1 ESCAPE '\\' \
             {CATALOG_ORDER}"
        );
        let rows = sqlx::query_as::<_, GameRow>(&sql)
            .bind(contains_pattern(query))
            .fetch_all(pool)
            .await?;
        Self::with_collections(pool, rows).await
    }

    // -----------------------------------------------------------------------
    // Collection helpers
    // -----------------------------------------------------------------------

    /// Load the items of one collection for a set of games, in stored order.
    pub async fn collection_items(
        pool: &PgPool,
        collection: Collection,
        game_ids: &[DbId],
    ) -> Result<CollectionItems, sqlx::Error> {
        let query = format!(
            "SELECT game_id, {value} FROM {table} \
             WHERE game_id = ANY($1) \
             ORDER BY game_id, position",
            value = collection.value_column(),
            table = collection.table(),
        );
        let pairs = sqlx::query_as::<_, (DbId, String)>(&query)
            .bind(game_ids)
            .fetch_all(pool)
            .await?;

        let mut items: CollectionItems = HashMap::new();
        for (game_id, value) in pairs {
            items.entry(game_id).or_default().push(value);
        }
        Ok(items)
    }

    /// Attach collections to rows, preserving row order.
    async fn with_collections(pool: &PgPool, rows: Vec<GameRow>) -> Result<Vec<Game>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut genres = Self::collection_items(pool, Collection::Genres, &ids).await?;
        let mut platforms = Self::collection_items(pool, Collection::Platforms, &ids).await?;
        let mut screenshots = Self::collection_items(pool, Collection::Screenshots, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_game(
                    genres.remove(&id).unwrap_or_default(),
                    platforms.remove(&id).unwrap_or_default(),
                    screenshots.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    /// Replace all three collections within an existing transaction.
    ///
    /// Deletes existing items, then inserts the new lists with their indexes
    /// as positions.
    async fn replace_collections_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        game_id: DbId,
        input: &GameFields,
    ) -> Result<(), sqlx::Error> {
        for collection in Collection::ALL {
            let table = collection.table();
            let value = collection.value_column();

            sqlx::query(&format!("DELETE FROM {table} WHERE game_id = $1"))
                .bind(game_id)
                .execute(&mut **tx)
                .await?;

            let items = collection.items(input);
            if items.is_empty() {
                continue;
            }

            sqlx::query(&format!(
                "INSERT INTO {table} (game_id, position, {value}) \
                 SELECT $1, (u.ord - 1)::INTEGER, u.item \
                 FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS u(item, ord)"
            ))
            .bind(game_id)
            .bind(items)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
