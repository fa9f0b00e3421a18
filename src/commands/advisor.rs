// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::api::FinanceApi;
use crate::chat::CompletionOutcome;
use crate::error::SessionError;
use crate::store::Session;

const PROMPT: &str = "you> ";

pub fn handle<A: FinanceApi>(session: &mut Session<A>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ask", sub)) => {
            let message = sub
                .get_many::<String>("message")
                .unwrap()
                .cloned()
                .collect::<Vec<_>>()
                .join(" ");
            let mut out = io::stdout().lock();
            turn(session, &message, &mut out)?;
        }
        _ => {
            let stdin = io::stdin();
            repl(session, stdin.lock(), io::stdout().lock())?;
        }
    }
    Ok(())
}

/// Send one message and print the newest assistant line.
pub fn turn<A: FinanceApi, W: Write>(
    session: &mut Session<A>,
    message: &str,
    out: &mut W,
) -> Result<()> {
    match session.send_chat(message) {
        Ok(CompletionOutcome::Discarded) => {}
        Ok(_) => {
            if let Some(reply) = session.chat().transcript().last() {
                writeln!(out, "advisor> {}", reply.content)?;
            }
        }
        Err(SessionError::EmptyMessage) => {}
        Err(e) => writeln!(out, "{}", e)?,
    }
    Ok(())
}

/// Read messages line by line until EOF or `/quit`; `/reset` starts over.
pub fn repl<A: FinanceApi, R: BufRead, W: Write>(
    session: &mut Session<A>,
    mut input: R,
    mut out: W,
) -> Result<()> {
    writeln!(
        out,
        "Talk to your finance buddy. /reset clears the conversation, /quit leaves."
    )?;
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        match line.trim() {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset_chat();
                writeln!(out, "(conversation cleared)")?;
            }
            _ => turn(session, line.trim_end_matches(['\r', '\n']), &mut out)?,
        }
    }
    Ok(())
}
