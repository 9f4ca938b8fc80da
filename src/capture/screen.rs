//! Screen capture module using xcap library
//!
//! Grabs the primary monitor and cuts regions out of it. Regions are in
//! global capture pixels: xcap may report monitor geometry in logical units
//! while `capture_image` returns physical pixels, so geometry is rescaled by
//! the ratio between the two before use.

use image::RgbaImage;
use log::debug;
use xcap::Monitor;

use crate::app::Region;
use crate::capture::recorder::FrameSource;
use crate::error::{AppError, AppResult};

/// Information about a monitor
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorInfo {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl MonitorInfo {
    /// Create MonitorInfo from xcap Monitor
    fn from_xcap(monitor: &Monitor) -> AppResult<Self> {
        Ok(Self {
            name: monitor.name().map_err(capture_error)?,
            x: monitor.x().map_err(capture_error)?,
            y: monitor.y().map_err(capture_error)?,
            width: monitor.width().map_err(capture_error)?,
            height: monitor.height().map_err(capture_error)?,
        })
    }

    /// Capture pixels per reported unit, derived from an actual capture
    pub fn capture_scale(&self, image_width: u32) -> f64 {
        if self.width == 0 {
            1.0
        } else {
            image_width as f64 / self.width as f64
        }
    }

    /// Top-left corner of the monitor in capture pixels
    pub fn physical_origin(&self, image_width: u32) -> (i32, i32) {
        let scale = self.capture_scale(image_width);
        (
            (self.x as f64 * scale).round() as i32,
            (self.y as f64 * scale).round() as i32,
        )
    }
}

fn capture_error(e: xcap::XCapError) -> AppError {
    AppError::Capture(e.to_string())
}

fn primary_monitor() -> AppResult<Monitor> {
    let monitors = Monitor::all()
        .map_err(|e| AppError::Capture(format!("Failed to get monitors: {}", e)))?;

    let mut fallback = None;
    for monitor in monitors {
        if monitor.is_primary().unwrap_or(false) {
            return Ok(monitor);
        }
        if fallback.is_none() {
            fallback = Some(monitor);
        }
    }

    fallback.ok_or_else(|| AppError::Capture("No monitors available".to_string()))
}

/// Size of the primary screen in capture pixels
pub fn screen_size() -> AppResult<(u32, u32)> {
    let (image, info) = capture_primary_monitor()?;
    debug!(
        "Primary monitor {} reports {}x{}, captures at {}x{}",
        info.name,
        info.width,
        info.height,
        image.width(),
        image.height()
    );
    Ok(image.dimensions())
}

/// Capture the whole primary monitor
pub fn capture_primary_monitor() -> AppResult<(RgbaImage, MonitorInfo)> {
    let monitor = primary_monitor()?;
    let info = MonitorInfo::from_xcap(&monitor)?;
    let image = monitor
        .capture_image()
        .map_err(|e| AppError::Capture(format!("Failed to capture screen: {}", e)))?;
    Ok((image, info))
}

/// Capture one region of the primary monitor
pub fn capture_region(region: Region) -> AppResult<RgbaImage> {
    ScreenGrabber::primary()?.grab(region)
}

/// Cuts `region` (global coordinates) out of an image of the monitor whose
/// top-left corner sits at `monitor_origin`.
pub fn crop_region(
    image: &RgbaImage,
    monitor_origin: (i32, i32),
    region: Region,
) -> AppResult<RgbaImage> {
    let left = region.x as i64 - monitor_origin.0 as i64;
    let top = region.y as i64 - monitor_origin.1 as i64;
    let right = region.right() - monitor_origin.0 as i64;
    let bottom = region.bottom() - monitor_origin.1 as i64;

    if left < 0 || top < 0 || right > image.width() as i64 || bottom > image.height() as i64 {
        return Err(AppError::Capture(format!(
            "Region {} exceeds screen bounds ({}x{} at {},{})",
            region,
            image.width(),
            image.height(),
            monitor_origin.0,
            monitor_origin.1
        )));
    }

    Ok(
        image::imageops::crop_imm(image, left as u32, top as u32, region.width, region.height)
            .to_image(),
    )
}

/// Repeated region grabs from one monitor
pub struct ScreenGrabber {
    monitor: Monitor,
    info: MonitorInfo,
}

impl ScreenGrabber {
    pub fn primary() -> AppResult<Self> {
        let monitor = primary_monitor()?;
        let info = MonitorInfo::from_xcap(&monitor)?;
        debug!(
            "Capturing from monitor {} ({}x{} at {},{})",
            info.name, info.width, info.height, info.x, info.y
        );
        Ok(Self { monitor, info })
    }
}

impl FrameSource for ScreenGrabber {
    fn grab(&mut self, region: Region) -> AppResult<RgbaImage> {
        let image = self
            .monitor
            .capture_image()
            .map_err(|e| AppError::Capture(format!("Failed to capture screen: {}", e)))?;
        let origin = self.info.physical_origin(image.width());
        crop_region(&image, origin, region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_capture_primary_monitor() {
        // This test may fail in CI environments without display
        if let Ok((image, monitor)) = capture_primary_monitor() {
            println!("Primary monitor: {}", monitor.name);
            assert!(monitor.width > 0);
            assert!(image.width() > 0);
            assert!(monitor.capture_scale(image.width()) > 0.0);
        }
    }

    #[test]
    fn crop_respects_monitor_origin() {
        let mut image = RgbaImage::new(100, 80);
        image.put_pixel(30, 20, Rgba([255, 0, 0, 255]));

        let region = Region::new(1950, 20, 10, 10).unwrap();
        let cropped = crop_region(&image, (1920, 0), region).unwrap();

        assert_eq!(cropped.dimensions(), (10, 10));
        assert_eq!(cropped.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn crop_out_of_bounds_fails() {
        let image = RgbaImage::new(100, 100);
        let region = Region::new(80, 80, 30, 30).unwrap();
        assert!(matches!(
            crop_region(&image, (0, 0), region),
            Err(AppError::Capture(_))
        ));

        let left_of_monitor = Region::new(-5, 0, 10, 10).unwrap();
        assert!(crop_region(&image, (0, 0), left_of_monitor).is_err());
    }

    fn logical_monitor(x: i32, width: u32, height: u32) -> MonitorInfo {
        MonitorInfo {
            name: "eDP-1".to_string(),
            x,
            y: 0,
            width,
            height,
        }
    }

    #[test]
    fn double_scale_monitor_crops_in_capture_pixels() {
        let mut image = RgbaImage::new(3840, 2160);
        image.put_pixel(3839, 2159, Rgba([0, 255, 0, 255]));
        let info = logical_monitor(0, 1920, 1080);

        assert_eq!(info.capture_scale(image.width()), 2.0);
        let origin = info.physical_origin(image.width());
        let full = Region::full_screen(image.width(), image.height()).unwrap();
        let cropped = crop_region(&image, origin, full).unwrap();
        assert_eq!(cropped.dimensions(), (3840, 2160));
        assert_eq!(cropped.get_pixel(3839, 2159), &Rgba([0, 255, 0, 255]));

        let corner = Region::new(3820, 2140, 20, 20).unwrap();
        let cropped = crop_region(&image, origin, corner).unwrap();
        assert_eq!(cropped.get_pixel(19, 19), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn secondary_origin_is_scaled_with_capture() {
        let info = logical_monitor(1920, 1920, 1080);
        assert_eq!(info.physical_origin(3840), (3840, 0));
        assert_eq!(info.physical_origin(1920), (1920, 0));
        assert_eq!(logical_monitor(0, 0, 0).capture_scale(640), 1.0);
    }

    #[test]
    fn full_monitor_crop_is_identity() {
        let image = RgbaImage::from_pixel(64, 48, Rgba([1, 2, 3, 255]));
        let region = Region::full_screen(64, 48).unwrap();
        assert_eq!(crop_region(&image, (0, 0), region).unwrap(), image);
    }
}
