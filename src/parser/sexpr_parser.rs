use super::ast::{Binding, Body, Expression, Variable};
use super::config::ParserConfig;
use crate::error::{Expected, ParseError, ParseErrorKind, Result};
use crate::lexer::{Checkpoint, Keyword, SExprScanner};

/// A grammar rule producing an expression
type Rule<'a> = fn(&mut SExprParser<'a>) -> Result<Option<Expression>>;

/// Recursive descent parser for uscheme source text
///
/// Each entry point parses the whole source from the beginning, so a parser
/// can be asked more than once and gives the same answer every time.
///
/// Every rule returns `Result<Option<T>>`:
/// - `Ok(Some(node))` - the rule matched and the scanner moved past it
/// - `Ok(None)` - soft mismatch, the scanner is back where the rule started
/// - `Err(error)` - fatal; a special form's keyword was matched but a required
///   token was missing. Nothing backtracks past that point.
pub struct SExprParser<'a> {
    scanner: SExprScanner<'a>,
    /// Position of the first token
    start: Checkpoint,
    config: ParserConfig,
    /// Parenthesized expressions currently open
    depth: usize,
    /// Furthest soft failure and what was expected there
    furthest: Option<(usize, Expected)>,
}

impl<'a> SExprParser<'a> {
    /// Creates a parser over `source` with the default configuration
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// Creates a parser over `source` with a custom configuration
    pub fn with_config(source: &'a str, config: ParserConfig) -> Self {
        let scanner = SExprScanner::new(source).with_snippet_len(config.snippet_len);
        SExprParser {
            start: scanner.checkpoint(),
            scanner,
            config,
            depth: 0,
            furthest: None,
        }
    }

    /// Byte offset immediately after the last consumed token
    pub fn offset(&self) -> usize {
        self.scanner.token_end()
    }

    /// Parses the whole source as a program body
    ///
    /// Input nested deeper than [`ParserConfig::max_depth`] is rejected with
    /// [`ParseErrorKind::NestingTooDeep`].
    pub fn parse(&mut self) -> Result<Body> {
        self.reset();
        tracing::debug!(entry = "body", len = self.scanner.source().len(), "parsing source");

        let body = match self.body()? {
            Some(body) => body,
            None => return Err(self.exhausted(Expected::Body)),
        };
        self.finish()?;

        tracing::debug!(
            definitions = body.definitions.len(),
            expressions = body.expressions.len(),
            nodes = body.node_count(),
            offset = self.offset(),
            "parsed body"
        );
        Ok(body)
    }

    /// Parses the whole source as a single expression
    ///
    /// Nesting is bounded the same way as in [`SExprParser::parse`].
    pub fn parse_expression(&mut self) -> Result<Expression> {
        self.reset();
        tracing::debug!(entry = "expression", len = self.scanner.source().len(), "parsing source");

        let expression = match self.expression()? {
            Some(expression) => expression,
            None => return Err(self.exhausted(Expected::Expression)),
        };
        self.finish()?;

        tracing::debug!(nodes = expression.node_count(), offset = self.offset(), "parsed expression");
        Ok(expression)
    }

    fn reset(&mut self) {
        self.scanner.rewind(self.start);
        self.depth = 0;
        self.furthest = None;
    }

    /// body = definition* expression+
    fn body(&mut self) -> Result<Option<Body>> {
        let checkpoint = self.scanner.checkpoint();

        let mut definitions = Vec::new();
        while let Some(definition) = self.definition()? {
            definitions.push(definition);
        }

        let mut expressions = Vec::new();
        while let Some(expression) = self.expression()? {
            expressions.push(expression);
        }

        if expressions.is_empty() {
            self.scanner.rewind(checkpoint);
            return Ok(None);
        }

        Ok(Some(Body {
            definitions,
            expressions,
        }))
    }

    /// (define variable expression)
    fn definition(&mut self) -> Result<Option<Binding>> {
        if !self.open_form(Keyword::Define) {
            return Ok(None);
        }

        let binding = self.required_binding()?;
        self.expect_close()?;
        Ok(Some(binding))
    }

    /// Ordered choice over every expression form
    fn expression(&mut self) -> Result<Option<Expression>> {
        // `true`/`false` are also valid identifiers, so they go first
        if let Some(value) = self.boolean() {
            return Ok(Some(Expression::Boolean(value)));
        }
        if let Some(variable) = self.variable() {
            return Ok(Some(Expression::Variable(variable)));
        }
        if let Some(value) = self.scanner.integer()? {
            return Ok(Some(Expression::Integer(value)));
        }
        if let Some(value) = self.scanner.string_literal()? {
            return Ok(Some(Expression::String(value)));
        }

        if self.scanner.rest().starts_with('(') {
            if self.depth >= self.config.max_depth {
                let limit = self.config.max_depth;
                return Err(self
                    .scanner
                    .error(
                        self.scanner.offset(),
                        ParseErrorKind::NestingTooDeep { limit },
                        Expected::Expression,
                    )
                    .into_committed());
            }

            self.depth += 1;
            let parsed = self.compound();
            self.depth -= 1;

            if let Some(expression) = parsed? {
                return Ok(Some(expression));
            }
        }

        let offset = self.scanner.offset();
        self.soft(offset, Expected::Expression)
    }

    /// Parenthesized forms; keyword forms first, application last
    fn compound(&mut self) -> Result<Option<Expression>> {
        let rules: [Rule<'a>; 8] = [
            Self::conditional,
            Self::conjunction,
            Self::disjunction,
            Self::mutation,
            Self::lambda,
            Self::let_form,
            Self::scope,
            Self::application,
        ];

        for rule in rules {
            if let Some(expression) = rule(self)? {
                return Ok(Some(expression));
            }
        }
        Ok(None)
    }

    fn boolean(&mut self) -> Option<bool> {
        if self.scanner.keyword(Keyword::True) {
            Some(true)
        } else if self.scanner.keyword(Keyword::False) {
            Some(false)
        } else {
            None
        }
    }

    fn variable(&mut self) -> Option<Variable> {
        self.scanner.identifier().map(Variable::new)
    }

    /// (if predicate consequent alternate)
    fn conditional(&mut self) -> Result<Option<Expression>> {
        if !self.open_form(Keyword::If) {
            return Ok(None);
        }

        let predicate = self.required_expression()?;
        let consequent = self.required_expression()?;
        let alternate = self.required_expression()?;
        self.expect_close()?;

        Ok(Some(Expression::Conditional {
            predicate: Box::new(predicate),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    /// (and expression+)
    fn conjunction(&mut self) -> Result<Option<Expression>> {
        if !self.open_form(Keyword::And) {
            return Ok(None);
        }
        Ok(Some(Expression::Conjunction(self.operands()?)))
    }

    /// (or expression+)
    fn disjunction(&mut self) -> Result<Option<Expression>> {
        if !self.open_form(Keyword::Or) {
            return Ok(None);
        }
        Ok(Some(Expression::Disjunction(self.operands()?)))
    }

    /// (set! variable expression)
    fn mutation(&mut self) -> Result<Option<Expression>> {
        if !self.open_form(Keyword::SetBang) {
            return Ok(None);
        }

        let binding = self.required_binding()?;
        self.expect_close()?;
        Ok(Some(Expression::Mutation(binding)))
    }

    /// (lambda (variable*) body)
    fn lambda(&mut self) -> Result<Option<Expression>> {
        if !self.open_form(Keyword::Lambda) {
            return Ok(None);
        }

        self.expect_open()?;
        let mut arguments = Vec::new();
        while let Some(argument) = self.variable() {
            arguments.push(argument);
        }
        self.expect_close()?;

        let body = self.required_body()?;
        self.expect_close()?;
        Ok(Some(Expression::Lambda { arguments, body }))
    }

    /// (let ((variable expression)*) body)
    fn let_form(&mut self) -> Result<Option<Expression>> {
        if !self.open_form(Keyword::Let) {
            return Ok(None);
        }

        self.expect_open()?;
        let mut bindings = Vec::new();
        while self.scanner.punct('(') {
            bindings.push(self.required_binding()?);
            self.expect_close()?;
        }
        self.expect_close()?;

        let body = self.required_body()?;
        self.expect_close()?;
        Ok(Some(Expression::Let { bindings, body }))
    }

    /// (begin body)
    fn scope(&mut self) -> Result<Option<Expression>> {
        if !self.open_form(Keyword::Begin) {
            return Ok(None);
        }

        let body = self.required_body()?;
        self.expect_close()?;
        Ok(Some(Expression::Scope(body)))
    }

    /// (expression expression*)
    ///
    /// No commit point: an unclosed or empty list is a soft mismatch.
    fn application(&mut self) -> Result<Option<Expression>> {
        let checkpoint = self.scanner.checkpoint();
        if !self.scanner.punct('(') {
            return Ok(None);
        }

        let applicator = match self.expression()? {
            Some(applicator) => applicator,
            None => {
                self.scanner.rewind(checkpoint);
                return Ok(None);
            }
        };

        let mut arguments = Vec::new();
        while let Some(argument) = self.expression()? {
            arguments.push(argument);
        }

        if !self.scanner.punct(')') {
            let offset = self.scanner.offset();
            self.scanner.rewind(checkpoint);
            return self.soft(offset, Expected::CloseParen);
        }

        Ok(Some(Expression::Application {
            applicator: Box::new(applicator),
            arguments,
        }))
    }

    /// expression+ ')'
    fn operands(&mut self) -> Result<Vec<Expression>> {
        let mut operands = vec![self.required_expression()?];
        while let Some(operand) = self.expression()? {
            operands.push(operand);
        }
        self.expect_close()?;
        Ok(operands)
    }

    /// Matches `(` followed by `keyword`, or rewinds
    fn open_form(&mut self, keyword: Keyword) -> bool {
        let checkpoint = self.scanner.checkpoint();
        if self.scanner.punct('(') && self.scanner.keyword(keyword) {
            tracing::trace!(%keyword, offset = self.scanner.offset(), "committed to form");
            true
        } else {
            self.scanner.rewind(checkpoint);
            false
        }
    }

    fn required_binding(&mut self) -> Result<Binding> {
        let variable = self.required_variable()?;
        let expression = self.required_expression()?;
        Ok(Binding::new(variable, expression))
    }

    fn required_variable(&mut self) -> Result<Variable> {
        match self.variable() {
            Some(variable) => Ok(variable),
            None => Err(self.committed_error(Expected::Variable)),
        }
    }

    fn required_expression(&mut self) -> Result<Expression> {
        match self.expression()? {
            Some(expression) => Ok(expression),
            None => Err(self.committed_error(Expected::Expression)),
        }
    }

    /// A body after a commit point
    ///
    /// When no expression follows the definitions, the error points at the
    /// furthest token the body could not match rather than at its start.
    fn required_body(&mut self) -> Result<Body> {
        let enclosing = self.furthest.take();
        let parsed = self.body();
        let inner = self.furthest;

        self.furthest = enclosing;
        if let Some((offset, expected)) = inner {
            self.record(offset, expected);
        }

        match parsed? {
            Some(body) => Ok(body),
            None => {
                let (offset, expected) = inner.unwrap_or((self.scanner.offset(), Expected::Body));
                Err(self.committed_error_at(offset, expected))
            }
        }
    }

    fn expect_open(&mut self) -> Result<()> {
        if self.scanner.punct('(') {
            Ok(())
        } else {
            Err(self.committed_error(Expected::OpenParen))
        }
    }

    fn expect_close(&mut self) -> Result<()> {
        if self.scanner.punct(')') {
            Ok(())
        } else {
            Err(self.committed_error(Expected::CloseParen))
        }
    }

    /// Records a soft failure and reports no match
    fn soft<T>(&mut self, offset: usize, expected: Expected) -> Result<Option<T>> {
        self.record(offset, expected);
        Ok(None)
    }

    /// Keeps the furthest soft failure; a later one at the same offset wins
    fn record(&mut self, offset: usize, expected: Expected) {
        match self.furthest {
            Some((furthest, _)) if furthest > offset => {}
            _ => self.furthest = Some((offset, expected)),
        }
    }

    /// Error for a required token missing after a commit point
    fn committed_error(&self, expected: Expected) -> ParseError {
        self.committed_error_at(self.scanner.offset(), expected)
    }

    fn committed_error_at(&self, offset: usize, expected: Expected) -> ParseError {
        tracing::trace!(offset, %expected, "missing token after commit point");
        self.scanner
            .error(offset, ParseErrorKind::Unexpected, expected)
            .into_committed()
    }

    /// Error for an entry rule whose alternatives all failed softly
    fn exhausted(&self, fallback: Expected) -> ParseError {
        let (offset, expected) = self
            .furthest
            .unwrap_or((self.scanner.offset(), fallback));
        self.scanner
            .error(offset, ParseErrorKind::Unexpected, expected)
    }

    fn finish(&self) -> Result<()> {
        if self.scanner.is_at_end() {
            Ok(())
        } else {
            Err(self.scanner.error(
                self.scanner.offset(),
                ParseErrorKind::TrailingInput,
                Expected::EndOfInput,
            ))
        }
    }
}
