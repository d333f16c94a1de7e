//! Migration: Create lectors and lector_approved_files tables.

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
                CREATE TABLE lectors (
                    id UUID PRIMARY KEY,
                    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    is_setter BOOLEAN NOT NULL DEFAULT FALSE,
                    contest JSONB NOT NULL DEFAULT '[]',
                    certificate JSONB NOT NULL DEFAULT '[]',
                    career JSONB NOT NULL DEFAULT '[]',
                    approved BOOLEAN NOT NULL DEFAULT FALSE,
                    rejected BOOLEAN NOT NULL DEFAULT FALSE,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- A user holds at most one lector profile
                CREATE UNIQUE INDEX idx_lectors_user_id ON lectors(user_id);

                -- Review queue lookup
                CREATE INDEX idx_lectors_pending
                    ON lectors(created_at)
                    WHERE approved = FALSE AND rejected = FALSE;

                CREATE TRIGGER update_lectors_updated_at
                    BEFORE UPDATE ON lectors
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();

                CREATE TABLE lector_approved_files (
                    id UUID PRIMARY KEY,
                    lector_id UUID NOT NULL REFERENCES lectors(id) ON DELETE CASCADE,
                    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    url VARCHAR(500) NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_lector_approved_files_lector_id
                    ON lector_approved_files(lector_id);
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
                DROP TABLE IF EXISTS lector_approved_files CASCADE;
                DROP TRIGGER IF EXISTS update_lectors_updated_at ON lectors;
                DROP TABLE IF EXISTS lectors CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
