//! Migration: Create centers and their owned child tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE centers (
                    id UUID PRIMARY KEY,
                    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    name VARCHAR(50) NOT NULL,
                    profile_img VARCHAR(500) NOT NULL,
                    address VARCHAR(255) NOT NULL,
                    detail_address VARCHAR(255),
                    tel VARCHAR(20),
                    web_url VARCHAR(500),
                    instagram_name VARCHAR(255),
                    youtube_url VARCHAR(500),
                    center_img JSONB NOT NULL DEFAULT '[]',
                    operating_time JSONB NOT NULL DEFAULT '[]',
                    utility JSONB NOT NULL DEFAULT '[]',
                    fee_img JSONB NOT NULL DEFAULT '[]',
                    approved BOOLEAN NOT NULL DEFAULT FALSE,
                    rejected BOOLEAN NOT NULL DEFAULT FALSE,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_centers_user_id ON centers(user_id, created_at);
                CREATE INDEX idx_centers_name ON centers(name) WHERE approved = TRUE;
                CREATE INDEX idx_centers_pending
                    ON centers(created_at)
                    WHERE approved = FALSE AND rejected = FALSE;

                CREATE TRIGGER update_centers_updated_at
                    BEFORE UPDATE ON centers
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();

                CREATE TABLE center_fees (
                    id UUID PRIMARY KEY,
                    center_id UUID NOT NULL REFERENCES centers(id) ON DELETE CASCADE,
                    name VARCHAR(50) NOT NULL,
                    price INTEGER NOT NULL CHECK (price >= 0),
                    count INTEGER NOT NULL CHECK (count >= 0)
                );
                CREATE INDEX idx_center_fees_center_id ON center_fees(center_id);

                CREATE TABLE center_holds (
                    id UUID PRIMARY KEY,
                    center_id UUID NOT NULL REFERENCES centers(id) ON DELETE CASCADE,
                    name VARCHAR(20) NOT NULL,
                    difficulty VARCHAR(10) NOT NULL,
                    is_color BOOLEAN NOT NULL DEFAULT FALSE
                );
                CREATE INDEX idx_center_holds_center_id ON center_holds(center_id);

                CREATE TABLE center_walls (
                    id UUID PRIMARY KEY,
                    center_id UUID NOT NULL REFERENCES centers(id) ON DELETE CASCADE,
                    name VARCHAR(20) NOT NULL,
                    wall_type VARCHAR(20) NOT NULL
                        CHECK (wall_type IN ('ENDURANCE', 'BOULDERING'))
                );
                CREATE INDEX idx_center_walls_center_id ON center_walls(center_id);

                CREATE TABLE center_approved_files (
                    id UUID PRIMARY KEY,
                    center_id UUID NOT NULL REFERENCES centers(id) ON DELETE CASCADE,
                    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    url VARCHAR(500) NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );
                CREATE INDEX idx_center_approved_files_center_id
                    ON center_approved_files(center_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TABLE IF EXISTS center_approved_files CASCADE;
                DROP TABLE IF EXISTS center_walls CASCADE;
                DROP TABLE IF EXISTS center_holds CASCADE;
                DROP TABLE IF EXISTS center_fees CASCADE;
                DROP TRIGGER IF EXISTS update_centers_updated_at ON centers;
                DROP TABLE IF EXISTS centers CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
