#![cfg(feature = "full-formats")]

#[path = "fixtures/mod.rs"]
mod fixtures;

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use peeksize::{ImageFormat, ImageProbe, ImageSize};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_concurrent_probes_share_one_probe() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "shared.jpg", &jpeg(1280, 720, 2, 4096));
        let path = Arc::new(path.to_str().unwrap().to_string());

        let probe = Arc::new(ImageProbe::new());

        let mut handles = vec![];

        // Spawn 10 threads that all probe the same file concurrently
        for _ in 0..10 {
            let probe = probe.clone();
            let path = path.clone();
            let handle = thread::spawn(move || {
                let size = probe.get_image_size(&path, "").unwrap();
                assert_eq!(size, ImageSize::new(1280, 720, ImageFormat::Jpeg));
            });
            handles.push(handle);
        }

        // Wait for all threads to complete
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_concurrent_probes_different_formats() {
        let dir = tempfile::tempdir().unwrap();
        let files = Arc::new(vec![
            (write_fixture(dir.path(), "a.png", &png(10, 11)), ImageFormat::Png),
            (write_fixture(dir.path(), "a.gif", &gif(10, 11)), ImageFormat::Gif),
            (write_fixture(dir.path(), "a.bmp", &bmp(10, 11)), ImageFormat::Bmp),
            (write_fixture(dir.path(), "noext", &tiff_be(10, 11)), ImageFormat::Tiff),
            (write_fixture(dir.path(), "a.psd", &psd(10, 11)), ImageFormat::Psd),
        ]);

        let mut handles = vec![];

        // Each thread uses its own probe and walks the files in a different order
        for i in 0..5 {
            let files = files.clone();
            let handle = thread::spawn(move || {
                let probe = ImageProbe::new();
                for step in 0..files.len() {
                    let (path, format) = &files[(i + step) % files.len()];
                    let size = probe.get_image_size(path.to_str().unwrap(), "").unwrap();
                    assert_eq!(size, ImageSize::new(10, 11, *format));
                }
            });
            handles.push(handle);
        }

        // Wait for all threads to complete
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
