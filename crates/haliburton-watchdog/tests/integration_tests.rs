//! Integration tests over the `/dev/port` backend.
//!
//! A sparse scratch file stands in for the port device: the file offset is
//! the port number, exactly as with `/dev/port`.

#![cfg(test)]

use haliburton_watchdog::prelude::*;
use haliburton_watchdog::regs::{GPIO, GPIO_DIR, RST_CON, RST_SOURCE, TIME_SET};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

type TestResult = Result<(), Box<dyn std::error::Error>>;

struct ScratchPortFile {
    path: PathBuf,
}

impl ScratchPortFile {
    fn new(name: &str) -> Result<Self, std::io::Error> {
        let path = std::env::temp_dir().join(format!(
            "haliburton-it-{}-{name}",
            std::process::id()
        ));
        std::fs::write(&path, vec![0u8; 0x600])?;
        Ok(Self { path })
    }

    fn write_at(&self, port: u16, bytes: &[u8]) -> Result<(), std::io::Error> {
        let mut file = std::fs::OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(u64::from(port)))?;
        file.write_all(bytes)
    }

    fn read_at<const N: usize>(&self, port: u16) -> Result<[u8; N], std::io::Error> {
        let mut file = std::fs::File::open(&self.path)?;
        file.seek(SeekFrom::Start(u64::from(port)))?;
        let mut buf = [0u8; N];
        file.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl Drop for ScratchPortFile {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_file(&self.path) {
            eprintln!("failed to remove {}: {error}", self.path.display());
        }
    }
}

mod full_lifecycle {
    use super::*;

    #[test]
    fn test_complete_lifecycle() -> TestResult {
        let scratch = ScratchPortFile::new("lifecycle")?;
        scratch.write_at(GPIO_DIR, &0xffff_ffffu32.to_le_bytes())?;
        scratch.write_at(RST_SOURCE, &[0x04])?;

        let device = E1030Driver.probe(
            &WatchdogConfig::default(),
            DevPort::open(&scratch.path)?,
            NoopDelay,
        )?;
        assert!(!device.is_active());
        assert_eq!(device.ops().reset_source(), 0x04);

        device.set_timeout(2)?;
        device.start()?;
        device.keepalive()?;
        assert!(device.is_active());

        assert_eq!(scratch.read_at::<1>(TIME_SET)?, [2]);
        assert_eq!(scratch.read_at::<1>(RST_CON)?, [0x01]);
        assert_eq!(
            u32::from_le_bytes(scratch.read_at::<4>(GPIO_DIR)?),
            0xffff_7fff
        );
        assert_eq!(u32::from_le_bytes(scratch.read_at::<4>(GPIO)?), 0x0000_8000);

        device.stop()?;
        assert!(!device.is_active());
        assert_eq!(scratch.read_at::<1>(RST_CON)?, [0x01]);

        E1030Driver.remove(device);
        Ok(())
    }

    #[test]
    fn test_config_file_drives_probe() -> TestResult {
        let scratch = ScratchPortFile::new("config")?;
        let config_path = scratch.path.with_extension("json");
        std::fs::write(
            &config_path,
            r#"{ "nowayout": true, "stop_mode": "clear_enable", "identity": "rack 3 wdt" }"#,
        )?;
        let config = WatchdogConfig::from_file(&config_path)?;
        std::fs::remove_file(&config_path)?;

        let device = E1030Driver.probe(&config, DevPort::open(&scratch.path)?, NoopDelay)?;
        assert_eq!(device.info().identity, "rack 3 wdt");
        assert!(device.nowayout());

        device.start()?;
        assert!(matches!(device.stop(), Err(WatchdogError::NoWayOut)));
        Ok(())
    }

    #[test]
    fn test_clear_enable_stop_over_dev_port() -> TestResult {
        let scratch = ScratchPortFile::new("clear")?;
        scratch.write_at(RST_CON, &[0x81])?;
        let config = WatchdogConfig::builder()
            .stop_mode(StopMode::ClearEnable)
            .build()?;

        let device = E1030Driver.probe(&config, DevPort::open(&scratch.path)?, NoopDelay)?;
        assert!(device.is_active());
        device.stop()?;

        assert_eq!(scratch.read_at::<1>(RST_CON)?, [0x80]);
        assert!(!device.ops().is_enabled());
        Ok(())
    }
}
