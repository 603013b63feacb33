use framesieve_filter::{
    select::{med5, trimmed_mean5},
    temporal::{
        ForwardBackwardMedian5, Iir1, SpatioTemporalMedian7, TemporalOrder3, TemporalOrder5,
        TemporalStatistic, WeightedAverage,
    },
    FilterError,
};
use framesieve_frame::{Frame, FrameSize};
use rayon::prelude::*;

/// Deterministic frame sequence where every pixel follows its own pattern.
fn stream(size: FrameSize, len: usize) -> Result<Vec<Frame<f32>>, FilterError> {
    (0..len)
        .map(|t| {
            let data = (0..size.area())
                .map(|i| ((i * 31 + t * 17) % 23) as f32 - 11.0)
                .collect();
            Ok(Frame::new(size, data)?)
        })
        .collect()
}

#[test]
fn test_order5_matches_sliding_window() -> Result<(), FilterError> {
    let size = [5, 4].into();
    let frames = stream(size, 12)?;

    let mut median = TemporalOrder5::new(size, TemporalStatistic::Median)?;
    let mut trimmed = TemporalOrder5::new(size, TemporalStatistic::TrimmedMean)?;
    median.history_mut().fill(&frames[0])?;
    trimmed.history_mut().fill(&frames[0])?;

    let mut dst_median = Frame::from_size_val(size, 0.0)?;
    let mut dst_trimmed = Frame::from_size_val(size, 0.0)?;

    // the window slides over [f0, f0, f0, f0, f0, f1, f2, ...]
    let mut padded = vec![&frames[0]; 4];
    padded.extend(frames.iter());

    for (t, src) in frames.iter().enumerate() {
        median.process(src, &mut dst_median)?;
        trimmed.process(src, &mut dst_trimmed)?;

        let w = &padded[t..t + 5];
        for i in 0..size.area() {
            let v = |k: usize| w[k].as_slice()[i];
            assert_eq!(dst_median.as_slice()[i], med5(v(0), v(1), v(2), v(3), v(4)));
            assert_eq!(
                dst_trimmed.as_slice()[i],
                trimmed_mean5(v(0), v(1), v(2), v(3), v(4))
            );
        }
    }

    Ok(())
}

#[test]
fn test_fb_median_constant_stream() -> Result<(), FilterError> {
    let size = [6, 6].into();
    let frame = Frame::from_size_val(size, 42.0)?;

    let mut filter = ForwardBackwardMedian5::new(size, 1.0)?;
    filter.history_mut().fill(&frame)?;

    let mut dst = Frame::from_size_val(size, 0.0)?;
    for _ in 0..7 {
        filter.process(&frame, &mut dst)?;
        assert_eq!(dst, frame);
    }

    Ok(())
}

#[test]
fn test_window_filters_with_debug_logging() -> Result<(), FilterError> {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let size = FrameSize {
        width: 6,
        height: 4,
    };
    let order3 = TemporalOrder3::new(size, TemporalStatistic::Max)?;
    let order5 = TemporalOrder5::new(size, TemporalStatistic::TrimmedMean)?;
    let mut median7 = SpatioTemporalMedian7::new(size)?;
    assert_eq!(order3.statistic(), TemporalStatistic::Max);
    assert_eq!(order5.statistic(), TemporalStatistic::TrimmedMean);

    let src = Frame::from_size_val(size, 2.0)?;
    let mut dst = Frame::from_size_val(size, 0.0)?;
    median7.process(&src, &mut dst)?;
    assert_eq!(dst.get_pixel(2, 2)?, 0.0);

    Ok(())
}

#[test]
fn test_independent_instances_across_threads() -> Result<(), FilterError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let size = [16, 8].into();
    let frames = stream(size, 10)?;

    let run = |alpha: f32| -> Result<Vec<f32>, FilterError> {
        let mut iir = Iir1::with_state(frames[0].clone(), alpha)?;
        let mut avg = WeightedAverage::new(size, alpha)?;
        let weight = Frame::from_size_val(size, 1.0)?;
        let mut dst = Frame::from_size_val(size, 0.0)?;
        for src in &frames {
            iir.process(src)?;
            avg.process(src, &weight, &mut dst)?;
        }
        let mut out = iir.state().as_slice().to_vec();
        out.extend_from_slice(dst.as_slice());
        Ok(out)
    };

    let alphas = [0.0, 0.25, 0.5, 0.75, 0.9, 1.0];
    let sequential = alphas.iter().map(|&a| run(a)).collect::<Result<Vec<_>, _>>()?;
    let parallel = alphas
        .par_iter()
        .map(|&a| run(a))
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(sequential, parallel);

    // alpha = 1 never leaves the initial state
    assert_eq!(&sequential[5][..size.area()], frames[0].as_slice());

    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_parameters_from_json() -> Result<(), Box<dyn std::error::Error>> {
    use framesieve_filter::temporal::SosCoefficients;

    let coeffs: SosCoefficients = serde_json::from_str(
        r#"{"b1": 0.5, "b2": 1.0, "b3": 0.5, "a2": -0.2, "a3": 0.1, "scale": 2.0}"#,
    )?;
    assert_eq!(coeffs, SosCoefficients::from([0.5, 1.0, 0.5, -0.2, 0.1, 2.0]));

    let stat: TemporalStatistic = serde_json::from_str(r#""trimmed_mean""#)?;
    assert_eq!(stat, TemporalStatistic::TrimmedMean);

    let size: FrameSize = serde_json::from_str(r#"{"width": 320, "height": 240}"#)?;
    assert_eq!(size.area(), 320 * 240);

    Ok(())
}
