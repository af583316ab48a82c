use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    booking::BookingRepositoryImpl, health::HealthCheckRepositoryImpl,
    participant::ParticipantRepositoryImpl, product::ProductRepositoryImpl,
};
use kernel::repository::{
    booking::BookingRepository, health::HealthCheckRepository,
    participant::ParticipantRepository, product::ProductRepository,
};

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    participant_repository: Arc<dyn ParticipantRepository>,
    product_repository: Arc<dyn ProductRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let booking_repository = Arc::new(BookingRepositoryImpl::new(pool.clone()));
        let participant_repository = Arc::new(ParticipantRepositoryImpl::new(pool.clone()));
        let product_repository = Arc::new(ProductRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            booking_repository,
            participant_repository,
            product_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }

    pub fn participant_repository(&self) -> Arc<dyn ParticipantRepository> {
        self.participant_repository.clone()
    }

    pub fn product_repository(&self) -> Arc<dyn ProductRepository> {
        self.product_repository.clone()
    }
}
