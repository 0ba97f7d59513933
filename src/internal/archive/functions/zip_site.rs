use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::internal::archive::structs::ArchiveError;

/// zip 文件名：`<site_id>_<timestamp_ms>.zip`
pub fn archive_file_name(site_id: &str, timestamp_ms: i64) -> String {
    format!("{site_id}_{timestamp_ms}.zip")
}

/// 打包 `downloads_root/<site_id>` 为 `downloads_root/<site_id>_<timestamp_ms>.zip`，
/// 成功后删除站点目录，返回 zip 路径。
///
/// 压缩是阻塞操作，放在 `spawn_blocking` 中执行。
pub async fn archive_site(
    downloads_root: &Path,
    site_id: &str,
    timestamp_ms: i64,
) -> Result<PathBuf, ArchiveError> {
    let site_dir = downloads_root.join(site_id);
    let zip_path = downloads_root.join(archive_file_name(site_id, timestamp_ms));

    let (src, dst) = (site_dir.clone(), zip_path.clone());
    let entries =
        tokio::task::spawn_blocking(move || zip_directory(&src, &dst)).await??;

    tokio::fs::remove_dir_all(&site_dir)
        .await
        .map_err(|source| ArchiveError::Io {
            path: site_dir.clone(),
            source,
        })?;

    tracing::info!(zip = %zip_path.display(), entries, "打包完成，已删除站点目录");
    Ok(zip_path)
}

/// 把目录内容写入 zip，条目名相对 `dir` 且用 `/` 分隔，包含目录条目；返回条目数。
pub fn zip_directory(dir: &Path, zip_path: &Path) -> Result<usize, ArchiveError> {
    if !dir.is_dir() {
        return Err(ArchiveError::MissingSiteDir(dir.to_path_buf()));
    }

    let file = File::create(zip_path).map_err(|source| ArchiveError::Io {
        path: zip_path.to_path_buf(),
        source,
    })?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    let mut count = 0;
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for path in sorted_children(&current)? {
            let name = entry_name(dir, &path);
            if path.is_dir() {
                writer.add_directory(format!("{name}/"), options)?;
                pending.push(path);
            } else {
                writer.start_file(name, options)?;
                let mut src = File::open(&path).map_err(|source| ArchiveError::Io {
                    path: path.clone(),
                    source,
                })?;
                io::copy(&mut src, &mut writer).map_err(|source| ArchiveError::Io {
                    path: path.clone(),
                    source,
                })?;
            }
            count += 1;
        }
    }

    writer.finish()?;
    Ok(count)
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    let io_err = |source| ArchiveError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut children = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    children.sort();
    Ok(children)
}

fn entry_name(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
