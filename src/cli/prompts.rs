use std::io::IsTerminal;

use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Input};

/// 补全后的站点与应用 id
#[derive(Debug, Clone)]
pub struct NetlifyIds {
    pub client_id: Option<String>,
    pub site_id: String,
}

fn interactive() -> bool {
    std::io::stdin().is_terminal()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// 缺少的 id 在终端中交互式输入；非终端环境下直接报错。
///
/// 已有令牌时不需要 client id。
pub fn resolve_ids(
    client_id: Option<String>,
    site_id: Option<String>,
    has_token: bool,
) -> Result<NetlifyIds> {
    let mut client_id = non_empty(client_id);
    let mut site_id = non_empty(site_id);

    if client_id.is_none() && !has_token {
        if !interactive() {
            bail!("缺少 client id，请通过 --client-id 或 NETLIFY_CLIENT_ID 提供");
        }
        client_id = Some(ask("Netlify App Client ID")?);
    }

    let site_id = match site_id.take() {
        Some(id) => id,
        None if interactive() => ask("Site ID")?,
        None => bail!("缺少 site id，请通过 --site-id 或 NETLIFY_SITE_ID 提供"),
    };

    Ok(NetlifyIds { client_id, site_id })
}

fn ask(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| {
            if input.trim().is_empty() { Err("不能为空") } else { Ok(()) }
        })
        .interact_text()
        .with_context(|| format!("读取 {prompt} 失败"))?;
    Ok(value.trim().to_string())
}

/// 命令行未指定时询问是否打包；非终端环境下默认不打包。
pub fn resolve_zip(choice: Option<bool>) -> Result<bool> {
    if let Some(choice) = choice {
        return Ok(choice);
    }
    if !interactive() {
        return Ok(false);
    }
    Confirm::new()
        .with_prompt("下载完成后打包为 zip？")
        .default(false)
        .interact()
        .context("读取打包选项失败")
}
