use common::{Decimal, Product, ProductId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{CreateOrder, OrderService, ProductService, UpdateStock};
use inventory_store::{InMemoryStore, ProductRepository};

fn seeded_store(rt: &tokio::runtime::Runtime, stock: i32) -> InMemoryStore {
    let store = InMemoryStore::new();
    let product = Product {
        id: ProductId::new("SKU-BENCH"),
        name: "Benchmark Widget".to_string(),
        price: Decimal::new(1999, 2),
        stock,
    };
    rt.block_on(async { store.save_product(&product).await.unwrap() });
    store
}

fn bench_create_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, i32::MAX);
    let service = OrderService::new(store.clone(), store);

    c.bench_function("domain/create_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .create_order(CreateOrder::new("SKU-BENCH", 1))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_update_stock(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, i32::MAX);
    let service = ProductService::new(store);

    c.bench_function("domain/update_stock", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .update_stock(UpdateStock::new("SKU-BENCH", 1))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_rejected_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, 1);
    let service = OrderService::new(store.clone(), store);

    c.bench_function("domain/create_order_insufficient_stock", |b| {
        b.iter(|| {
            rt.block_on(async {
                let _ = service.create_order(CreateOrder::new("SKU-BENCH", 5)).await;
            });
        });
    });
}

criterion_group!(
    benches,
    bench_create_order,
    bench_update_stock,
    bench_rejected_order
);
criterion_main!(benches);
