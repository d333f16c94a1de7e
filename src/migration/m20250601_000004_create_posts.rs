//! Migration: Create posts and climbing_histories tables.

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
                CREATE TABLE posts (
                    id UUID PRIMARY KEY,
                    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    center_id UUID NOT NULL REFERENCES centers(id) ON DELETE CASCADE,
                    content VARCHAR(500) NOT NULL,
                    img JSONB NOT NULL DEFAULT '[]',
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_posts_center_created ON posts(center_id, created_at DESC);

                CREATE TABLE climbing_histories (
                    id UUID PRIMARY KEY,
                    post_id UUID NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
                    hold_id UUID NOT NULL REFERENCES center_holds(id) ON DELETE CASCADE,
                    climbing_count INTEGER NOT NULL CHECK (climbing_count > 0)
                );

                CREATE INDEX idx_climbing_histories_post_id ON climbing_histories(post_id);
                CREATE INDEX idx_climbing_histories_hold_id ON climbing_histories(hold_id);
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
                DROP TABLE IF EXISTS climbing_histories CASCADE;
                DROP TABLE IF EXISTS posts CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
