//! # 交互式输入
//!
//! 提示写到 stderr，输入从 stdin 读取，stdout 重定向时仍可交互。
//! stdin 与 stderr 都是终端时通过 `console::Term` 读取；否则按行读取 stdin
//! (管道输入)，读到 EOF 视为输入结束。
//!
//! ## 依赖关系
//! - 被 `commands/dq.rs`, `commands/ste_sp.rs` 使用
//! - 使用 `console` crate

use crate::error::{CcdError, Result};

use console::Term;
use std::io::{self, BufRead, IsTerminal, Write};

/// 反复提示直到得到非空输入（已去除首尾空白）；输入结束返回 `None`
pub fn read_non_empty(first_prompt: &str, retry_prompt: &str) -> Result<Option<String>> {
    let term = Term::stderr();

    if term.is_term() && io::stdin().is_terminal() {
        prompt_loop(first_prompt, retry_prompt, |prompt| {
            term.write_str(prompt)?;
            term.read_line().map(Some)
        })
    } else {
        let stdin = io::stdin();
        read_non_empty_from(&mut stdin.lock(), &mut io::stderr(), first_prompt, retry_prompt)
    }
}

/// 从任意行输入源读取，提示写到 `out`
pub fn read_non_empty_from<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    first_prompt: &str,
    retry_prompt: &str,
) -> Result<Option<String>> {
    prompt_loop(first_prompt, retry_prompt, |prompt| {
        out.write_all(prompt.as_bytes())?;
        out.flush()?;

        let mut line = String::new();
        match input.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    })
}

fn prompt_loop<F>(first_prompt: &str, retry_prompt: &str, mut next_line: F) -> Result<Option<String>>
where
    F: FnMut(&str) -> io::Result<Option<String>>,
{
    let mut prompt = first_prompt;
    loop {
        match next_line(prompt).map_err(CcdError::Terminal)? {
            None => return Ok(None),
            Some(line) if !line.trim().is_empty() => return Ok(Some(line.trim().to_string())),
            Some(_) => prompt = retry_prompt,
        }
    }
}
