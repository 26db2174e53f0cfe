use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gamerec::data::UserInteractions;
use gamerec::features::Item;
use gamerec::recommend::ContentRecommender;
use gamerec::config::RecommenderConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const GENRES: [&str; 10] = [
    "action",
    "adventure",
    "casual",
    "indie",
    "rpg",
    "simulation",
    "sports",
    "strategy",
    "racing",
    "puzzle",
];

const TAGS: [&str; 12] = [
    "singleplayer",
    "multiplayer",
    "coop",
    "openworld",
    "pixelgraphics",
    "roguelike",
    "story",
    "sandbox",
    "survival",
    "horror",
    "anime",
    "fps",
];

fn generate_catalog(n: usize, rng: &mut StdRng) -> Vec<Item> {
    (0..n)
        .map(|i| {
            let genres: Vec<&str> = GENRES.choose_multiple(rng, 2).copied().collect();
            let tags: Vec<&str> = TAGS.choose_multiple(rng, 4).copied().collect();
            Item::new(i)
                .with_genres(genres)
                .with_tags(tags)
                .with_sentiment(rng.gen_range(0.0..1.0))
        })
        .collect()
}

fn generate_users(n: usize, catalog: usize, rng: &mut StdRng) -> Vec<UserInteractions> {
    (0..n)
        .map(|u| {
            let owned = (0..rng.gen_range(1..20))
                .map(|_| rng.gen_range(0..catalog))
                .collect();
            UserInteractions::new(format!("user_{u}"), owned)
        })
        .collect()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_fit");
    let mut rng = StdRng::seed_from_u64(42);

    for size in [100, 1_000, 10_000].iter() {
        let items = generate_catalog(*size, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                ContentRecommender::fit(black_box(&items), RecommenderConfig::default())
                    .expect("should succeed")
            });
        });
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_generate");
    group.sample_size(20);
    let mut rng = StdRng::seed_from_u64(7);

    for size in [1_000, 10_000].iter() {
        let items = generate_catalog(*size, &mut rng);
        let users = generate_users(200, *size, &mut rng);
        let rec = ContentRecommender::fit(&items, RecommenderConfig::default())
            .expect("should succeed");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| rec.generate(black_box(&users), &[]).expect("should succeed"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_generate);
criterion_main!(benches);
