use anyhow::Context;
use dng_color_rs::color_pipeline::{
    DngToSrgbPipeline, OutputConfig, RenderConfig, TiffCompression, WhiteBalanceMode,
};
use dng_color_rs::logger;

use tracing::info;

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting dng_color...");

    let render_config = RenderConfig::builder().apply_gamma(true).build();
    let output_config = OutputConfig::builder()
        .compression(TiffCompression::DeflateBalanced)
        .predictor(Some(2))
        .build();
    let pipeline = DngToSrgbPipeline::new(render_config, output_config);

    info!("White balance pipeline initialized");
    info!("Compression: {:?}", pipeline.output_config().compression);
    info!(
        "Output encoding: {}",
        if pipeline.render_config().apply_gamma {
            "sRGB"
        } else {
            "linear"
        }
    );

    pipeline
        .convert_file("input.tiff", "input.json", "output.tiff", WhiteBalanceMode::AsShot)
        .context("conversion of input.tiff failed")?;

    info!("Conversion successful!");
    Ok(())
}
