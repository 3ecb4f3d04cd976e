// Criterion benchmarks for Tour Rewards

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tour_rewards::core::{distance::distance_miles, rank_nearby, ProviderError, RewardCalculator};
use tour_rewards::models::{Attraction, Location, User, VisitedLocation};
use tour_rewards::services::{RewardPointProvider, StaticCatalog};
use uuid::Uuid;

struct InstantPoints;

#[async_trait]
impl RewardPointProvider for InstantPoints {
    async fn points_for(&self, _attraction_id: Uuid, _user_id: Uuid) -> Result<u32, ProviderError> {
        Ok(100)
    }
}

fn create_catalog(size: usize) -> Vec<Attraction> {
    (0..size)
        .map(|i| {
            let lat = 25.0 + (i % 25) as f64;
            let lon = -125.0 + (i / 25) as f64 * 0.5;
            Attraction::new(format!("Attraction {}", i), Location::new(lat, lon))
        })
        .collect()
}

fn create_user(visits: usize) -> Arc<User> {
    let user = Arc::new(User::new(Uuid::new_v4(), "bench"));
    for i in 0..visits {
        let location = Location::new(25.0 + (i % 25) as f64, -125.0 + (i % 50) as f64 * 0.5);
        user.add_visited_location(VisitedLocation::now(user.user_id(), location));
    }
    user
}

fn bench_distance(c: &mut Criterion) {
    let a = Location::new(33.817595, -117.922008);
    let b = Location::new(40.7128, -74.0060);
    c.bench_function("distance_miles", |bench| {
        bench.iter(|| distance_miles(black_box(&a), black_box(&b)));
    });
}

fn bench_rank_nearby(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("rank_nearby");

    for size in [26, 100, 1000].iter() {
        let catalog = create_catalog(*size);
        let user = create_user(1);
        let visit = user.last_visited_location().unwrap();

        let (visit, catalog, user) = (&visit, &catalog, &user);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |bench, _| {
            bench.to_async(&runtime).iter(|| async move {
                rank_nearby(black_box(visit), catalog, user, &InstantPoints)
                    .await
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_calculate_rewards(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("calculate_rewards");

    for visits in [10, 100, 1000].iter() {
        let calculator = RewardCalculator::new(
            Arc::new(StaticCatalog::new(create_catalog(100))),
            Arc::new(InstantPoints),
        );

        let calculator = &calculator;

        group.bench_with_input(BenchmarkId::from_parameter(visits), visits, |bench, &visits| {
            bench.to_async(&runtime).iter(|| async move {
                let user = create_user(visits);
                calculator.calculate_rewards(&user).await.unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_distance, bench_rank_nearby, bench_calculate_rewards);
criterion_main!(benches);
