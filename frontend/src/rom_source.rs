//! ROM image extraction from whatever the user picked.
//!
//! A plain ROM image passes through untouched. A ZIP archive is opened and
//! the ROM inside it is returned. Whether the bytes are a usable ROM is for
//! the emulation core to decide.

use std::borrow::Cow;
use std::io::{Cursor, Read};

use log::debug;
use thiserror::Error;

/// Local file header signature that starts every ZIP archive.
const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

#[derive(Debug, Error)]
pub enum RomSourceError {
    #[error("invalid ZIP archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to read archive entry: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive contains no files")]
    Empty,

    #[error("archive holds {0} files and none of them is a .nes image")]
    Ambiguous(usize),
}

pub fn is_zip(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC)
}

/// Return the ROM image contained in `bytes`.
///
/// Resolution order for archives:
/// 1. The first file entry whose name ends in `.nes` (any case).
/// 2. The only file entry, if there is exactly one.
pub fn extract_rom(bytes: &[u8]) -> Result<Cow<'_, [u8]>, RomSourceError> {
    if !is_zip(bytes) {
        return Ok(Cow::Borrowed(bytes));
    }
    load_from_zip(bytes).map(Cow::Owned)
}

fn load_from_zip(bytes: &[u8]) -> Result<Vec<u8>, RomSourceError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    let mut files = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        // Skip directories
        if entry.is_dir() {
            continue;
        }
        files.push((i, entry.name().to_string()));
    }

    let index = match files
        .iter()
        .find(|(_, name)| name.to_ascii_lowercase().ends_with(".nes"))
    {
        Some((index, _)) => *index,
        None => match files.as_slice() {
            [] => return Err(RomSourceError::Empty),
            [(index, _)] => *index,
            _ => return Err(RomSourceError::Ambiguous(files.len())),
        },
    };

    let mut entry = archive.by_index(index)?;
    debug!("extracting {} from archive", entry.name());
    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_zip(files: &[(&str, &[u8])], method: zip::CompressionMethod) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default().compression_method(method);
        for (name, data) in files {
            if name.ends_with('/') {
                zip.add_directory(*name, options).unwrap();
                continue;
            }
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn raw_rom_passes_through() {
        let rom = b"NES\x1A\x02\x01rest-of-image";
        let out = extract_rom(rom).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, rom);
    }

    #[test]
    fn picks_nes_entry_over_others() {
        let archive = create_test_zip(
            &[
                ("readme.txt", b"hello"),
                ("roms/", b""),
                ("roms/Game.NES", &[0xAA; 64]),
            ],
            zip::CompressionMethod::Stored,
        );
        let out = extract_rom(&archive).unwrap();
        assert_eq!(&*out, &[0xAA; 64][..]);
    }

    #[test]
    fn single_entry_without_extension() {
        let archive = create_test_zip(&[("image.bin", &[0xBB; 16])], zip::CompressionMethod::Stored);
        assert_eq!(&*extract_rom(&archive).unwrap(), &[0xBB; 16][..]);
    }

    #[test]
    fn deflated_entry() {
        let rom = vec![0x42u8; 8 * 1024];
        let archive = create_test_zip(&[("game.nes", &rom)], zip::CompressionMethod::Deflated);
        assert!(archive.len() < rom.len());
        assert_eq!(extract_rom(&archive).unwrap().into_owned(), rom);
    }

    #[test]
    fn ambiguous_archive_rejected() {
        let archive = create_test_zip(
            &[("a.bin", &[1]), ("b.bin", &[2])],
            zip::CompressionMethod::Stored,
        );
        assert!(matches!(
            extract_rom(&archive),
            Err(RomSourceError::Ambiguous(2))
        ));
    }

    #[test]
    fn directory_only_archive_rejected() {
        let archive = create_test_zip(&[("roms/", b"")], zip::CompressionMethod::Stored);
        assert!(matches!(extract_rom(&archive), Err(RomSourceError::Empty)));
    }

    #[test]
    fn truncated_archive_rejected() {
        let archive = create_test_zip(&[("game.nes", &[0xCC; 32])], zip::CompressionMethod::Stored);
        assert!(matches!(
            extract_rom(&archive[..12]),
            Err(RomSourceError::Archive(_))
        ));
    }
}
