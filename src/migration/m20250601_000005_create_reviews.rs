//! Migration: Create reviews, review_tags and review_answers tables.

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
                CREATE TABLE reviews (
                    id UUID PRIMARY KEY,
                    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    center_id UUID NOT NULL REFERENCES centers(id) ON DELETE CASCADE,
                    content VARCHAR(500) NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_reviews_center_created ON reviews(center_id, created_at DESC);

                CREATE TABLE review_tags (
                    id UUID PRIMARY KEY,
                    review_id UUID NOT NULL REFERENCES reviews(id) ON DELETE CASCADE,
                    word VARCHAR(30) NOT NULL
                );

                CREATE INDEX idx_review_tags_review_id ON review_tags(review_id);
                CREATE INDEX idx_review_tags_word ON review_tags(word);

                CREATE TABLE review_answers (
                    id UUID PRIMARY KEY,
                    review_id UUID NOT NULL REFERENCES reviews(id) ON DELETE CASCADE,
                    content VARCHAR(500) NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- One answer per review
                CREATE UNIQUE INDEX idx_review_answers_review_id ON review_answers(review_id);

                CREATE TRIGGER update_review_answers_updated_at
                    BEFORE UPDATE ON review_answers
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
                DROP TRIGGER IF EXISTS update_review_answers_updated_at ON review_answers;
                DROP TABLE IF EXISTS review_answers CASCADE;
                DROP TABLE IF EXISTS review_tags CASCADE;
                DROP TABLE IF EXISTS reviews CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
