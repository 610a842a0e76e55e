//! Benchmarks for full-model translation.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use idforge::model::{Model, ObjectType};
use idforge::options::TranslatorOptions;
use idforge::translate::ForwardTranslator;

/// A synthetic building: `zones` zones with four walls each, all sharing one
/// construction, plus per-zone lights on a shared schedule. Heavy on shared
/// references, which is the path the identity map exists for.
fn synthetic_model(zones: usize) -> Model {
    let mut model = Model::new();

    let brick = model
        .add_named_object(ObjectType::OpaqueMaterial, "Brick")
        .unwrap();
    let construction = model
        .add_named_object(ObjectType::Construction, "Exterior Wall")
        .unwrap();
    model.set_refs(construction, "layers", vec![brick]).unwrap();

    let schedule = model
        .add_named_object(ObjectType::ScheduleConstant, "Always On")
        .unwrap();
    model.set_real(schedule, "value", 1.0).unwrap();

    for z in 0..zones {
        let zone = model
            .add_named_object(ObjectType::Zone, format!("Zone {z}"))
            .unwrap();
        let mut surfaces = Vec::with_capacity(4);
        for (w, facing) in ["North", "East", "South", "West"].iter().enumerate() {
            let wall = model
                .add_named_object(ObjectType::Surface, format!("Zone {z} {facing} Wall"))
                .unwrap();
            model.set_ref(wall, "zone", zone).unwrap();
            model.set_ref(wall, "construction", construction).unwrap();
            model.set_real(wall, "area", 10.0 + w as f64).unwrap();
            surfaces.push(wall);
        }
        model.set_refs(zone, "surfaces", surfaces).unwrap();

        let lights = model
            .add_named_object(ObjectType::Lights, format!("Zone {z} Lights"))
            .unwrap();
        model.set_ref(lights, "zone", zone).unwrap();
        model.set_ref(lights, "schedule", schedule).unwrap();
        model.set_real(lights, "lighting_level", 400.0).unwrap();
    }

    model
}

fn bench_translate(c: &mut Criterion) {
    for zones in [10, 100] {
        let model = synthetic_model(zones);
        c.bench_function(&format!("translate_{zones}_zones"), |bench| {
            bench.iter(|| {
                let mut translator = ForwardTranslator::new(TranslatorOptions::default());
                black_box(translator.translate(&model).unwrap())
            })
        });
    }
}

fn bench_serialize(c: &mut Criterion) {
    let model = synthetic_model(100);
    let mut translator = ForwardTranslator::new(TranslatorOptions::default());
    let workspace = translator.translate(&model).unwrap();

    c.bench_function("serialize_100_zones", |bench| {
        bench.iter(|| black_box(idforge::idf::to_idf_string(&workspace)))
    });
}

criterion_group!(benches, bench_translate, bench_serialize);
criterion_main!(benches);
