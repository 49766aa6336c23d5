use depthnorm::{
    image::{Image, ImageSize},
    k3d::{
        camera::{xyz_to_uvd, CameraIntrinsics},
        label::Label,
    },
    normalize::{denormalize_label, TargetSize},
    sample::Sample,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = env_logger::Env::default().default_filter_or("debug");
    env_logger::init_from_env(env);

    let intrinsics = CameraIntrinsics::default();
    let size = ImageSize {
        width: intrinsics.width as usize,
        height: intrinsics.height as usize,
    };

    // a flat background with a closer blob where the hand would be
    let mut data = vec![1500u16; size.area()];
    for y in 180..300 {
        for x in 260..380 {
            let (dx, dy) = (x as f32 - 320.0, y as f32 - 240.0);
            data[y * size.width + x] = (650.0 + 0.002 * (dx * dx + dy * dy)) as u16;
        }
    }
    let image = Image::<u16, 1>::new(size, data)?;

    // a few joints in camera space, in millimeters
    let joints = vec![
        [0.0, 0.0, 650.0],
        [-30.0, 40.0, 670.0],
        [25.0, 55.0, 660.0],
        [40.0, -10.0, 680.0],
    ];
    let uvd = xyz_to_uvd(&joints, &intrinsics)?;
    let center = uvd[0];

    let sample = Sample::new(image, Label::new(uvd));
    let target = TargetSize::new(128, 128, 1.0);

    let (normalized, bounds) = sample.normalize_around(&center, 250.0, 588.0, &target)?;

    let values = normalized.image.as_slice();
    let (min, max) = values
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    log::info!("bounding box: {:?}", bounds);
    log::info!(
        "normalized image: {} with depth in [{:.3}, {:.3}]",
        normalized.image.size(),
        min,
        max
    );
    for point in normalized.label.points() {
        log::info!("normalized joint: {:?}", point);
    }

    let restored = denormalize_label(&normalized.label, &bounds, &target)?;
    for (point, original) in restored.points().iter().zip(sample.label.points()) {
        log::info!("restored joint: {:?} (was {:?})", point, original);
    }

    Ok(())
}
