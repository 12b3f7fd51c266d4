//! Emits NASM source for a Linux i386 program that exits with the returned value.

use retlang_frontend::ast::{IntegerLiteralExpression, ReturnStatement};

const LINE_ENDING: &str = "\r\n";
const INDENT: &str = "\t";

const ENTRY_POINT: &str = "_start";

/// `sys_exit` in the i386 Linux syscall table.
const SYS_EXIT: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodegenError {
    #[error("no return statement to generate code for")]
    MissingReturnStatement,
}

pub fn generate(root: Option<&ReturnStatement>) -> Result<String, CodegenError> {
    let statement = root.ok_or(CodegenError::MissingReturnStatement)?;

    let mut codegen = CodeGenerator::default();
    codegen.gen_preamble();
    codegen.gen_return(statement);

    Ok(codegen.finish())
}

#[derive(Default)]
struct CodeGenerator {
    lines: Vec<String>,
}

impl CodeGenerator {
    fn gen_preamble(&mut self) {
        self.push_line(0, "section .text");
        self.push_line(1, format!("global {ENTRY_POINT}"));
        self.push_line(0, "");
        self.push_line(0, format!("{ENTRY_POINT}:"));
    }

    fn gen_return(&mut self, statement: &ReturnStatement) {
        self.push_line(1, format!("mov eax, {SYS_EXIT}"));
        self.gen_expr(&statement.expr);
        self.push_line(1, "int 80h");
    }

    /// Outputs to `ebx`. The digits are spliced in as written, so nothing
    /// here can tell whether they fit in the register.
    fn gen_expr(&mut self, expr: &IntegerLiteralExpression) {
        self.push_line(1, format!("mov ebx, {}", expr.digits()));
    }

    fn push_line(&mut self, indent: usize, s: impl AsRef<str>) {
        let mut line = INDENT.repeat(indent);
        line.push_str(s.as_ref());
        self.lines.push(line);
    }

    /// Joins the lines; the last one has no line ending.
    fn finish(self) -> String {
        self.lines.join(LINE_ENDING)
    }
}
