use affine_transforms::{
    Angle, Operation, Transform, Transformation, create, derive_linear_map, rotate_z, scale,
    translate,
};
use criterion::{Criterion, criterion_group, criterion_main};
use faer::rand::{Rng, SeedableRng, rngs::SmallRng};
use std::hint::black_box;

fn coords(npoints: usize, ndim: usize) -> Vec<Vec<f64>> {
    let mut rng = SmallRng::seed_from_u64(1991);
    let mut pts = Vec::with_capacity(npoints);
    for _ in 0..npoints {
        let mut pt = Vec::with_capacity(ndim);
        for _ in 0..ndim {
            pt.push(rng.random::<f64>() * 100.0);
        }
        pts.push(pt);
    }
    pts
}

fn composite_ops() -> Vec<Operation> {
    vec![
        Operation::translation(&[1.0, 2.0, 3.0]),
        Operation::scaling(&[2.0, 2.0, 2.0]),
        Operation::RotateZ(Angle::degrees(90.0)),
        Operation::RotateXY(Angle::degrees(45.0)),
    ]
}

fn bench_transform(c: &mut Criterion, name: &str, t: &Transform) {
    let coords = coords(1000, t.input_ndim());
    let mut buf = vec![f64::NAN; t.output_ndim()];
    c.bench_function(name, |b| {
        b.iter(|| {
            for pt in coords.iter() {
                t.transform_into(pt, &mut buf);
                black_box(&buf);
            }
        })
    });
}

fn bench_columns(c: &mut Criterion, name: &str, t: &Transform) {
    let npoints = 1000;
    let columns: Vec<Vec<f64>> = (0..t.input_ndim())
        .map(|d| (0..npoints).map(|i| (i * (d + 1)) as f64).collect())
        .collect();
    let col_refs: Vec<&[f64]> = columns.iter().map(|c| c.as_slice()).collect();
    let mut out = vec![vec![f64::NAN; npoints]; t.output_ndim()];
    c.bench_function(name, |b| {
        b.iter(|| {
            let mut out_refs: Vec<&mut [f64]> = out.iter_mut().map(|c| c.as_mut_slice()).collect();
            t.column_transform_into(&col_refs, &mut out_refs);
            black_box(&out_refs);
        })
    });
}

fn translate_points(c: &mut Criterion) {
    bench_transform(c, "translate", &translate(&[2.0, 3.0, 4.0]).unwrap());
}

fn scale_points(c: &mut Criterion) {
    bench_transform(c, "scale", &scale(&[2.0, 3.0, 4.0]).unwrap());
}

fn rotate_points(c: &mut Criterion) {
    bench_transform(c, "rotate_z", &rotate_z(Angle::degrees(30.0)));
}

fn composite_points(c: &mut Criterion) {
    bench_transform(c, "composite", &create(&composite_ops()).unwrap());
}

fn composite_columns(c: &mut Criterion) {
    bench_columns(c, "composite_columns", &create(&composite_ops()).unwrap());
}

fn linear_map_points(c: &mut Criterion) {
    bench_transform(
        c,
        "linear_map",
        &derive_linear_map(0.0, 143.0, 21.0, 200.0).unwrap(),
    );
}

fn build_composite(c: &mut Criterion) {
    let ops = composite_ops();
    c.bench_function("create", |b| b.iter(|| black_box(create(&ops).unwrap())));
}

criterion_group!(
    apply,
    translate_points,
    scale_points,
    rotate_points,
    composite_points,
    composite_columns,
    linear_map_points
);
criterion_group!(build, build_composite);
criterion_main!(apply, build);
