use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::{ProductError, map_save};
use crate::domain::product::model::{NewProductProps, Product};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};
use crate::domain::product::validation;

pub struct CreateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateProductUseCase for CreateProductUseCaseImpl {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError> {
        self.logger.info(&format!(
            "Creating product with code: {}",
            params.code.as_deref().unwrap_or("<none>")
        ));

        let props = NewProductProps {
            title: validation::required_text(params.title, "title")?,
            description: validation::required_text(params.description, "description")?,
            code: validation::required_text(params.code, "code")?,
            price: validation::price(params.price.ok_or(ProductError::MissingField("price"))?)?,
            stock: validation::stock(params.stock.ok_or(ProductError::MissingField("stock"))?)?,
            category: validation::required_text(params.category, "category")?,
            status: params.status.unwrap_or(true),
            thumbnails: validation::thumbnails(params.thumbnails.unwrap_or_default()),
        };

        let holder = self.repository.find_by_code(&props.code).await?;
        validation::code_available(&props.code, holder.as_ref(), None)?;

        let product = Product::new(props);
        self.repository
            .create(&product)
            .await
            .map_err(|e| map_save(e, &product.code))?;

        self.logger
            .info(&format!("Product created with id: {}", product.id));
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use bigdecimal::BigDecimal;
    use mockall::mock;
    use std::str::FromStr;

    mock! {
        pub ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
            async fn get_by_id(&self, id: uuid::Uuid) -> Result<Product, RepositoryError>;
            async fn get_by_ids(&self, ids: &[uuid::Uuid]) -> Result<Vec<Product>, RepositoryError>;
            async fn find_by_code(&self, code: &str) -> Result<Option<Product>, RepositoryError>;
            async fn create(&self, product: &Product) -> Result<(), RepositoryError>;
            async fn update(&self, product: &Product) -> Result<(), RepositoryError>;
            async fn delete(&self, id: uuid::Uuid) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn valid_params() -> CreateProductParams {
        CreateProductParams {
            title: Some(" Linen Shirt ".to_string()),
            description: Some("Breathable summer shirt".to_string()),
            code: Some("SHIRT-001".to_string()),
            price: Some(29.9),
            stock: Some(12),
            category: Some("Clothing".to_string()),
            status: None,
            thumbnails: None,
        }
    }

    fn existing_with_code(code: &str) -> Product {
        Product::new(NewProductProps {
            title: "Old Shirt".to_string(),
            description: "Existing".to_string(),
            code: code.to_string(),
            price: BigDecimal::from(10),
            stock: 1,
            category: "Clothing".to_string(),
            status: true,
            thumbnails: vec![],
        })
    }

    #[tokio::test]
    async fn should_create_product_when_params_are_valid() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_find_by_code().returning(|_| Ok(None));
        mock_repo.expect_create().times(1).returning(|_| Ok(()));

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(valid_params()).await;

        assert!(result.is_ok());
        let product = result.unwrap();
        assert_eq!(product.title, "Linen Shirt");
        assert_eq!(product.price, BigDecimal::from_str("29.9").unwrap());
        assert!(product.status);
        assert!(product.thumbnails.is_empty());
    }

    #[tokio::test]
    async fn should_reject_product_when_required_field_is_missing() {
        let mock_repo = MockProductRepo::new();

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(CreateProductParams {
                category: None,
                ..valid_params()
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::MissingField("category")
        ));
    }

    #[tokio::test]
    async fn should_reject_product_when_price_is_negative() {
        let mock_repo = MockProductRepo::new();

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(CreateProductParams {
                price: Some(-1.0),
                ..valid_params()
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::InvalidPrice));
    }

    #[tokio::test]
    async fn should_reject_duplicate_code_without_saving() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_find_by_code()
            .returning(|code| Ok(Some(existing_with_code(code))));
        mock_repo.expect_create().never();

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(valid_params()).await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::DuplicateCode(code) if code == "SHIRT-001"
        ));
    }

    #[tokio::test]
    async fn should_report_duplicate_code_when_store_rejects_insert() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_find_by_code().returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .returning(|_| Err(RepositoryError::Duplicated));

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(valid_params()).await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::DuplicateCode(_)
        ));
    }
}
