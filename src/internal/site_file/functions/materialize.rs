//! 目录还原：把扁平的 `a/b/c.txt` 路径映射为本地目录结构，并在写文件前保证目录存在。

use std::path::{Path, PathBuf};

use crate::internal::site_file::structs::materialize_error::MaterializeError;

/// 拆分相对路径：返回 (目录段列表, 文件名)。
///
/// - 空段与 `.` 段会被跳过（兼容 `//`、`./` 写法）
/// - 出现 `..` 直接拒绝，任何条目都不能跳出站点根目录
pub fn split_relative_path(
    path: &str,
) -> Result<(Vec<&str>, &str), MaterializeError> {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(MaterializeError::ParentTraversal(
                    path.to_string(),
                ));
            }
            s => segments.push(s),
        }
    }

    if path.ends_with('/') {
        return Err(MaterializeError::EmptyFileName(path.to_string()));
    }

    match segments.pop() {
        Some(file_name) => Ok((segments, file_name)),
        None => Err(MaterializeError::EmptyFileName(path.to_string())),
    }
}

/// 文件所在目录：`root` 加上路径中最后一个 `/` 之前的部分。
pub fn directory_for(
    root: &Path,
    path: &str,
) -> Result<PathBuf, MaterializeError> {
    let (dirs, _) = split_relative_path(path)?;
    let mut dir = root.to_path_buf();
    dir.extend(dirs);
    Ok(dir)
}

/// 文件的完整本地路径。
pub fn destination_path(
    root: &Path,
    path: &str,
) -> Result<PathBuf, MaterializeError> {
    let (dirs, file_name) = split_relative_path(path)?;
    let mut dest = root.to_path_buf();
    dest.extend(dirs);
    dest.push(file_name);
    Ok(dest)
}

/// 保证 `path` 对应的目录存在（含所有缺失的上级目录），已存在时不报错。
///
/// 失败时不重试，由调用方把该任务标记为失败。
pub async fn ensure_directory_for(
    root: &Path,
    path: &str,
) -> Result<PathBuf, MaterializeError> {
    let dir = directory_for(root, path)?;
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|source| MaterializeError::CreateDir {
            path: dir.clone(),
            source,
        })?;
    Ok(dir)
}
