//! Fixture archives for unit tests.

use std::io::{Cursor, Write};

use zip::unstable::write::FileOptionsExt;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub(crate) enum Member<'a> {
    File(&'a str, &'a [u8]),
    Dir(&'a str),
    Symlink(&'a str, &'a str),
    /// ZipCrypto-protected file member.
    Encrypted(&'a str, &'a [u8]),
}

/// Build an in-memory ZIP with deflated file members, in the given order.
pub(crate) fn zip_bytes(members: &[Member<'_>]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for member in members {
        match member {
            Member::File(name, content) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content).unwrap();
            }
            Member::Dir(name) => writer.add_directory(*name, options).unwrap(),
            Member::Symlink(name, target) => writer.add_symlink(*name, *target, options).unwrap(),
            Member::Encrypted(name, content) => {
                writer
                    .start_file(*name, options.with_deprecated_encryption(b"secret"))
                    .unwrap();
                writer.write_all(content).unwrap();
            }
        }
    }

    writer.finish().unwrap().into_inner()
}
