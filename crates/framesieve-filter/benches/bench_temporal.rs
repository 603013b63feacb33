use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use framesieve_filter::temporal::{
    ForwardBackwardMedian5, Iir1, IirSos, SosCoefficients, TemporalOrder3, TemporalOrder5,
    TemporalStatistic, WeightedAverage,
};
use framesieve_frame::Frame;

fn bench_temporal(c: &mut Criterion) {
    let mut group = c.benchmark_group("Temporal");

    for (width, height) in [(80, 60), (320, 240), (640, 480)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let size = [*width, *height].into();

        let src = Frame::new(size, (0..width * height).map(|v| (v % 97) as f32).collect()).unwrap();
        let weight = Frame::from_size_val(size, 0.5).unwrap();
        let dst = Frame::from_size_val(size, 0.0).unwrap();

        group.bench_with_input(BenchmarkId::new("iir1", &parameter_string), &src, |b, i| {
            let mut filter = Iir1::new(size, 0.9).unwrap();
            b.iter(|| black_box(filter.process(i).map(|_| ())))
        });

        group.bench_with_input(
            BenchmarkId::new("iir_sos", &parameter_string),
            &(&src, &dst),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                let coeffs = SosCoefficients::from([0.2, 0.4, 0.2, -0.5, 0.3, 1.0]);
                let mut filter = IirSos::new(size, coeffs).unwrap();
                b.iter(|| black_box(filter.process(src, &mut dst).map(|_| ())))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("weighted_average", &parameter_string),
            &(&src, &dst),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                let mut filter = WeightedAverage::new(size, 0.9).unwrap();
                b.iter(|| black_box(filter.process(src, &weight, &mut dst).map(|_| ())))
            },
        );

        for statistic in [TemporalStatistic::Median, TemporalStatistic::Max] {
            group.bench_with_input(
                BenchmarkId::new(format!("order3_{:?}", statistic), &parameter_string),
                &(&src, &dst),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    let mut filter = TemporalOrder3::new(size, statistic).unwrap();
                    b.iter(|| black_box(filter.process(src, &mut dst).map(|_| ())))
                },
            );
        }

        for statistic in [TemporalStatistic::Median, TemporalStatistic::TrimmedMean] {
            group.bench_with_input(
                BenchmarkId::new(format!("order5_{:?}", statistic), &parameter_string),
                &(&src, &dst),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    let mut filter = TemporalOrder5::new(size, statistic).unwrap();
                    b.iter(|| black_box(filter.process(src, &mut dst).map(|_| ())))
                },
            );
        }

        group.bench_with_input(
            BenchmarkId::new("fb_median5", &parameter_string),
            &(&src, &dst),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                let mut filter = ForwardBackwardMedian5::new(size, 5.0).unwrap();
                b.iter(|| black_box(filter.process(src, &mut dst).map(|_| ())))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_temporal);
criterion_main!(benches);
