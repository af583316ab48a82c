use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{CategoryId, ProductId},
    list::PaginatedList,
    product::{
        event::{CreateProduct, UpdateProduct},
        Product, ProductListOptions,
    },
};
use kernel::repository::product::ProductRepository;
use shared::error::{AppError, AppResult};
use sqlx::PgConnection;

use crate::database::{model::product::ProductRow, ConnectionPool};

const SELECT_PRODUCTS: &str = r#"
    SELECT
        p.product_id,
        p.product_name,
        p.image_url,
        p.price,
        p.stock,
        c.category_name
    FROM products AS p
    INNER JOIN categories AS c ON p.category_id = c.category_id
"#;

#[derive(new)]
pub struct ProductRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn find_all(&self, options: ProductListOptions) -> AppResult<PaginatedList<Product>> {
        let ProductListOptions { limit, offset } = options;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "{SELECT_PRODUCTS} ORDER BY p.product_id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items: rows.into_iter().map(Product::from).collect(),
        })
    }

    async fn create(&self, event: CreateProduct) -> AppResult<Product> {
        let mut tx = self.db.begin().await?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM products WHERE product_name ILIKE '%' || $1 || '%')",
        )
        .bind(&event.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if exists {
            return Err(AppError::BadRequest(format!(
                "Product with name {} already exists",
                event.name
            )));
        }

        let category_id = Self::category_by_name(&mut tx, &event.category_name).await?;

        let (product_id,): (ProductId,) = sqlx::query_as(
            r#"
                INSERT INTO products (product_name, image_url, price, stock, category_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING product_id
            "#,
        )
        .bind(&event.name)
        .bind(&event.image_url)
        .bind(event.price)
        .bind(event.stock)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let product = Self::fetch_by_id(&mut tx, product_id).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(product)
    }

    async fn update(&self, event: UpdateProduct) -> AppResult<Product> {
        let mut tx = self.db.begin().await?;

        let existing: Option<(ProductId,)> =
            sqlx::query_as("SELECT product_id FROM products WHERE product_id = $1 FOR UPDATE")
                .bind(event.product_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if existing.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "Product ({}) was not found",
                event.product_id
            )));
        }

        let category_id = Self::category_by_name(&mut tx, &event.category_name).await?;

        sqlx::query(
            r#"
                UPDATE products
                SET product_name = $1,
                    image_url = $2,
                    price = $3,
                    stock = $4,
                    category_id = $5
                WHERE product_id = $6
            "#,
        )
        .bind(&event.name)
        .bind(&event.image_url)
        .bind(event.price)
        .bind(event.stock)
        .bind(category_id)
        .bind(event.product_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let product = Self::fetch_by_id(&mut tx, event.product_id).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(product)
    }
}

impl ProductRepositoryImpl {
    // Category requests name the category loosely; the first
    // case-insensitive containment match wins.
    async fn category_by_name(conn: &mut PgConnection, name: &str) -> AppResult<CategoryId> {
        let category: Option<(CategoryId,)> = sqlx::query_as(
            r#"
                SELECT category_id
                FROM categories
                WHERE category_name ILIKE '%' || $1 || '%'
                ORDER BY category_id
                LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(AppError::SpecificOperationError)?;
        match category {
            Some((category_id,)) => Ok(category_id),
            None => Err(AppError::EntityNotFound(format!(
                "Category ({name}) was not found"
            ))),
        }
    }

    async fn fetch_by_id(conn: &mut PgConnection, product_id: ProductId) -> AppResult<Product> {
        let row: ProductRow = sqlx::query_as(&format!("{SELECT_PRODUCTS} WHERE p.product_id = $1"))
            .bind(product_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn listing_is_paginated_over_the_seeded_catalog(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = ProductRepositoryImpl::new(ConnectionPool::new(pool));

        let page = repo
            .find_all(ProductListOptions {
                limit: 5,
                offset: 0,
            })
            .await?;
        assert_eq!(page.total, 11);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].name, "Pepsi 33cl.");
        assert_eq!(page.items[0].category_name, "Drikkevarer");

        let rest = repo
            .find_all(ProductListOptions {
                limit: 5,
                offset: 10,
            })
            .await?;
        assert_eq!(rest.items.len(), 1);
        Ok(())
    }

    #[sqlx::test]
    async fn creating_a_colliding_name_is_rejected(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ProductRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .create(CreateProduct::new(
                "pepsi 33cl.".into(),
                "https://example.com/pepsi.jpg".into(),
                22.0,
                10,
                "Drikkevarer".into(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::BadRequest(_))));
        Ok(())
    }

    #[sqlx::test]
    async fn creating_with_unknown_category_is_not_found(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = ProductRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .create(CreateProduct::new(
                "Faxe Kondi 33cl.".into(),
                "https://example.com/faxe.jpg".into(),
                18.0,
                40,
                "Slush Ice".into(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }

    #[sqlx::test]
    async fn update_replaces_all_fields(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ProductRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let product_id: i64 =
            sqlx::query_scalar("SELECT product_id FROM products WHERE product_name = 'Heineken'")
                .fetch_one(&pool)
                .await?;

        let updated = repo
            .update(UpdateProduct::new(
                ProductId::new(product_id),
                "Heineken 33cl.".into(),
                "https://example.com/heineken.jpg".into(),
                28.0,
                90,
                "Alkohol".into(),
            ))
            .await?;
        assert_eq!(updated.name, "Heineken 33cl.");
        assert_eq!(updated.price, 28.0);
        assert_eq!(updated.stock, 90);
        Ok(())
    }

    #[sqlx::test]
    async fn updating_a_missing_product_is_not_found(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = ProductRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .update(UpdateProduct::new(
                ProductId::new(4040),
                "Ghost".into(),
                "https://example.com/ghost.jpg".into(),
                1.0,
                1,
                "Andet".into(),
            ))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }
}
