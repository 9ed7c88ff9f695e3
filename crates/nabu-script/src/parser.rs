use crate::ast::{BinOp, Call, Chain, Expr, If, Literal, Program, Rhs, Stmt};
use crate::diag::Diagnostics;
use crate::lexer::{self, Token, TokenKind};

// ── Parser ────────────────────────────────────────────────────────────────

/// Recursive-descent parser over a token stream.
///
/// Never fails: statements that cannot be parsed are dropped, and any token
/// that does not start a statement is consumed and discarded one at a time,
/// so garbage between statements cannot stall parsing. Everything discarded
/// is reported to the optional [`Diagnostics`] sink.
pub struct Parser<'d> {
    tokens: Vec<Token>,
    pos: usize,
    diag: Option<&'d mut Diagnostics>,
}

impl<'d> Parser<'d> {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            tokens.push(Token { kind: TokenKind::Eof, text: String::new(), line: 0, column: 0 });
        }
        Self { tokens, pos: 0, diag: None }
    }

    pub fn with_diagnostics(tokens: Vec<Token>, diag: &'d mut Diagnostics) -> Self {
        Self { diag: Some(diag), ..Self::new(tokens) }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn peek_next_kind(&self) -> TokenKind {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + 1).min(last)].kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            return true;
        }
        false
    }

    fn note_here(&mut self, message: impl Into<String>) {
        let (line, column) = (self.peek().line, self.peek().column);
        if let Some(diag) = self.diag.as_deref_mut() {
            diag.note(line, column, message);
        }
    }

    // ── Statements ────────────────────────────────────────────────────────

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while self.peek_kind() != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
        }
        Program { statements }
    }

    /// One-token lookahead decides the statement form; anything else is
    /// discarded token by token.
    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.peek_kind() {
            TokenKind::If => Some(self.parse_if()),
            TokenKind::Component => {
                let chain = self.parse_chain();
                self.eat(TokenKind::Semicolon);
                Some(Stmt::Chain(chain))
            }
            TokenKind::Ident => match self.peek_next_kind() {
                TokenKind::Assign => self.parse_assignment(),
                TokenKind::Dot => {
                    let chain = self.parse_chain();
                    self.eat(TokenKind::Semicolon);
                    Some(Stmt::Chain(chain))
                }
                _ => {
                    let tok = self.advance();
                    self.note_here_at(&tok, format!("discarded stray identifier `{}`", tok.text));
                    None
                }
            },
            // Statement separators between statements carry no content.
            TokenKind::Semicolon => {
                self.advance();
                None
            }
            _ => {
                let tok = self.advance();
                self.note_here_at(&tok, format!("discarded stray token `{}`", tok.text));
                None
            }
        }
    }

    fn note_here_at(&mut self, tok: &Token, message: String) {
        if let Some(diag) = self.diag.as_deref_mut() {
            diag.note(tok.line, tok.column, message);
        }
    }

    fn parse_assignment(&mut self) -> Option<Stmt> {
        let name = self.advance().text;
        self.advance(); // `=`

        // The right-hand side is a chain when it starts with a component
        // keyword, or with an identifier immediately followed by `.`.
        let chain_ahead = self.peek_kind() == TokenKind::Component
            || (self.peek_kind() == TokenKind::Ident
                && self.peek_next_kind() == TokenKind::Dot);
        let value = if chain_ahead {
            Some(Rhs::Chain(self.parse_chain()))
        } else {
            self.parse_expr().map(Rhs::Expr)
        };
        self.eat(TokenKind::Semicolon);

        match value {
            Some(value) => Some(Stmt::Assign { name, value }),
            None => {
                self.note_here(format!("dropped assignment to `{name}`: no right-hand side"));
                None
            }
        }
    }

    fn parse_chain(&mut self) -> Chain {
        let root = self.advance().text;
        let mut calls = Vec::new();
        while self.eat(TokenKind::Dot) {
            if self.peek_kind() != TokenKind::Ident {
                self.note_here("chain call without a method name");
                break;
            }
            let name = self.advance().text;
            if !self.eat(TokenKind::LParen) {
                self.note_here(format!("chain call `{name}` without an argument list"));
                break;
            }
            let args = self.parse_args();
            calls.push(Call { name, args });
        }
        Chain { root, calls }
    }

    /// Comma-separated argument expressions. Collection stops at the first
    /// token that is neither a comma nor `)`; a missing `)` is tolerated.
    fn parse_args(&mut self) -> Vec<Expr> {
        let mut args = Vec::new();
        if self.eat(TokenKind::RParen) {
            return args;
        }
        loop {
            match self.parse_expr() {
                Some(expr) => args.push(expr),
                None => break,
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.eat(TokenKind::RParen);
        args
    }

    fn parse_if(&mut self) -> Stmt {
        self.advance(); // `if`
        let condition = self.parse_condition();
        let then_block = self.parse_block();

        // Each `elseif` nests as the else-block of the clause before it, so a
        // trailing plain `else` belongs to the last `elseif`.
        let mut clauses = Vec::new();
        while self.peek_kind() == TokenKind::ElseIf {
            self.advance();
            let cond = self.parse_condition();
            let block = self.parse_block();
            clauses.push((cond, block));
        }
        let mut else_block =
            if self.eat(TokenKind::Else) { self.parse_block() } else { Vec::new() };
        for (cond, block) in clauses.into_iter().rev() {
            else_block =
                vec![Stmt::If(If { condition: cond, then_block: block, else_block })];
        }

        Stmt::If(If { condition, then_block, else_block })
    }

    fn parse_condition(&mut self) -> Expr {
        self.eat(TokenKind::LParen);
        let cond = match self.parse_expr() {
            Some(expr) => expr,
            None => {
                self.note_here("missing condition; treated as false");
                Expr::Literal(Literal::Bool(false))
            }
        };
        self.eat(TokenKind::RParen);
        cond
    }

    fn parse_block(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        if !self.eat(TokenKind::LBrace) {
            self.note_here("expected `{` block");
            return stmts;
        }
        while !matches!(self.peek_kind(), TokenKind::RBrace | TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                stmts.push(stmt);
            }
        }
        self.eat(TokenKind::RBrace);
        self.eat(TokenKind::Semicolon); // `;` after `}` is optional
        stmts
    }

    // ── Expressions ───────────────────────────────────────────────────────
    //
    // Standard precedence climbing; every binary operator is
    // left-associative. A level that cannot parse its right operand returns
    // what it has so far.

    fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_or()
    }

    fn match_op(&mut self, ops: &[(TokenKind, BinOp)]) -> Option<BinOp> {
        let kind = self.peek_kind();
        let op = ops.iter().find(|(k, _)| *k == kind).map(|&(_, op)| op)?;
        self.advance();
        Some(op)
    }

    fn parse_or(&mut self) -> Option<Expr> {
        let mut left = self.parse_and()?;
        while let Some(op) = self.match_op(&[(TokenKind::OrOr, BinOp::Or)]) {
            let Some(right) = self.parse_and() else { break };
            left = Expr::binary(left, op, right);
        }
        Some(left)
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut left = self.parse_equality()?;
        while let Some(op) = self.match_op(&[(TokenKind::AndAnd, BinOp::And)]) {
            let Some(right) = self.parse_equality() else { break };
            left = Expr::binary(left, op, right);
        }
        Some(left)
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        let mut left = self.parse_comparison()?;
        while let Some(op) =
            self.match_op(&[(TokenKind::EqEq, BinOp::Eq), (TokenKind::NotEq, BinOp::Ne)])
        {
            let Some(right) = self.parse_comparison() else { break };
            left = Expr::binary(left, op, right);
        }
        Some(left)
    }

    fn parse_comparison(&mut self) -> Option<Expr> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_op(&[
            (TokenKind::Lt, BinOp::Lt),
            (TokenKind::Le, BinOp::Le),
            (TokenKind::Gt, BinOp::Gt),
            (TokenKind::Ge, BinOp::Ge),
        ]) {
            let Some(right) = self.parse_additive() else { break };
            left = Expr::binary(left, op, right);
        }
        Some(left)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) =
            self.match_op(&[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)])
        {
            let Some(right) = self.parse_multiplicative() else { break };
            left = Expr::binary(left, op, right);
        }
        Some(left)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut left = self.parse_unary()?;
        while let Some(op) =
            self.match_op(&[(TokenKind::Star, BinOp::Mul), (TokenKind::Slash, BinOp::Div)])
        {
            let Some(right) = self.parse_unary() else { break };
            left = Expr::binary(left, op, right);
        }
        Some(left)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        if self.eat(TokenKind::Bang) {
            return self.parse_unary().map(|e| Expr::Not(Box::new(e)));
        }
        self.parse_primary()
    }

    /// Does not consume a token it cannot use; recovery happens at the
    /// statement level.
    fn parse_primary(&mut self) -> Option<Expr> {
        match self.peek_kind() {
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr();
                self.eat(TokenKind::RParen);
                inner
            }
            TokenKind::Str => Some(Expr::Literal(Literal::Str(self.advance().text))),
            TokenKind::Number => Some(Expr::Literal(Literal::Number(self.advance().text))),
            TokenKind::Bool => {
                Some(Expr::Literal(Literal::Bool(self.advance().text == "true")))
            }
            TokenKind::Ident => Some(Expr::Literal(Literal::Ident(self.advance().text))),
            _ => None,
        }
    }
}

// ── Entry points ──────────────────────────────────────────────────────────

/// Parse a token stream into a [`Program`]. Never fails.
pub fn parse(tokens: Vec<Token>) -> Program {
    Parser::new(tokens).parse_program()
}

/// Parse, recording dropped tokens and statements in `diag`.
pub fn parse_with(tokens: Vec<Token>, diag: &mut Diagnostics) -> Program {
    Parser::with_diagnostics(tokens, diag).parse_program()
}

/// Tokenize and parse `src` in one step.
pub fn parse_str(src: &str) -> Program {
    parse(lexer::tokenize(src))
}
