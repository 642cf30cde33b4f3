use std::{fs::File, io::Write};

use image::{GrayImage, ImageEncoder, Luma};
use stringart::{Config, Engine};

fn main() {
    let image = GrayImage::from_fn(300, 300, |x, y| {
        let d = (x as f32 - 150.0).hypot(y as f32 - 150.0);
        Luma([if (60.0..90.0).contains(&d) { 20 } else { 235 }])
    });
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(image.as_raw(), 300, 300, image::ExtendedColorType::L8)
        .unwrap();

    let mut engine = Engine::default();
    engine.initialize().unwrap();
    let art = engine
        .generate::<f32>(&bytes, &Config::new(180, 1500, 25))
        .unwrap();
    println!("{} lines, {:?}", art.len(), art.completion());

    File::create("ring_instructions.txt")
        .and_then(|mut file| file.write_all(art.build_instructions().as_bytes()))
        .unwrap();
    svg::save("ring.svg", &art.build_svg("black", 0.4)).unwrap();
}
