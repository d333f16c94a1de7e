//! Migration: Create users table.
//!
//! One row per OAuth identity. Role starts as PENDING and changes on sign-up.

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
                -- Shared trigger function for updated_at
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = NOW();
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                CREATE TABLE users (
                    id UUID PRIMARY KEY,
                    oauth_id VARCHAR(255) NOT NULL,
                    sns VARCHAR(255) NOT NULL,
                    nickname VARCHAR(20),
                    profile_img VARCHAR(500),
                    email VARCHAR(255),
                    instagram_name VARCHAR(255),
                    role VARCHAR(20) NOT NULL DEFAULT 'PENDING'
                        CHECK (role IN ('PENDING', 'LECTOR', 'CENTER_ADMIN', 'ADMIN')),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Nickname uniqueness is the real guard against concurrent sign-ups
                CREATE UNIQUE INDEX idx_users_nickname ON users(nickname);

                CREATE UNIQUE INDEX idx_users_oauth_identity ON users(oauth_id, sns);

                CREATE TRIGGER update_users_updated_at
                    BEFORE UPDATE ON users
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
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
                DROP TRIGGER IF EXISTS update_users_updated_at ON users;
                DROP TABLE IF EXISTS users CASCADE;
                DROP FUNCTION IF EXISTS update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }
}
