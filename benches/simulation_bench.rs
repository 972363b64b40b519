use criterion::{black_box, criterion_group, criterion_main, Criterion};
use composite_physics::{
    BallBound, CollisionBound, Material, Part, PhysicalEntity, PhysicsWorld, RectangleBound, Vec2, WorldConfig,
};

// A ball hull with two rectangular wings.
fn composite_body(position: Vec2, motion: Vec2) -> PhysicalEntity {
    let hull: Vec<CollisionBound> = vec![BallBound::new(2.0, Vec2::ZERO).unwrap().into()];
    let mut body = PhysicalEntity::new(Material::metal(), hull).unwrap();
    for side in [-1.0, 1.0] {
        let wing = Part::new(
            Material::default(),
            vec![RectangleBound::new(Vec2::new(3.0, 1.0), Vec2::ZERO, 0.0).unwrap().into()],
        )
        .unwrap();
        body.attach_part(body.root(), wing, Vec2::new(side * 3.5, 0.0), 10.0).unwrap();
    }
    body.set_position(position);
    body.set_motion(motion);
    body
}

// --- Helper for a field of bodies converging on the centre ---
fn run_converging_field(world: &mut PhysicsWorld, num_bodies: usize) {
    let per_row = (num_bodies as f64).sqrt().ceil() as usize;
    for i in 0..num_bodies {
        let position = Vec2::new((i % per_row) as f64 * 12.0, (i / per_row) as f64 * 12.0)
            - Vec2::new(per_row as f64 * 6.0, per_row as f64 * 6.0);
        let motion = -position.normalize() * 20.0;
        world.add_entity(composite_body(position, motion));
    }

    let dt = 1.0 / 60.0;
    let steps = 30;
    for _ in 0..steps {
        world.tick(black_box(dt));
    }
}

fn bench_converging_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("converging_field");

    for num_bodies in [10, 100, 400].iter() {
        group.bench_with_input(criterion::BenchmarkId::from_parameter(num_bodies), num_bodies, |b, &n| {
            b.iter(|| {
                let mut world = PhysicsWorld::new(WorldConfig::default()).unwrap();
                run_converging_field(&mut world, black_box(n));
                world.drain_events().len()
            });
        });
    }
    group.finish();
}

// Same field around a gravitating centre
fn bench_central_gravity(c: &mut Criterion) {
    let mut group = c.benchmark_group("central_gravity");

    for num_bodies in [10, 100, 400].iter() {
        group.bench_with_input(criterion::BenchmarkId::from_parameter(num_bodies), num_bodies, |b, &n| {
            b.iter(|| {
                let config = WorldConfig::default().with_central_gravity(Vec2::ZERO, 50_000.0);
                let mut world = PhysicsWorld::new(config).unwrap();
                run_converging_field(&mut world, black_box(n));
                world.drain_events().len()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_converging_field, bench_central_gravity);
criterion_main!(benches);
