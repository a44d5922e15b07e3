//! Recursive-descent parser building a [`Pdg`] from DOT tokens.
//!
//! Supported: `strict`, `graph`/`digraph`, node/edge/attribute statements,
//! `ID = ID` statements, edge chains, nested and anonymous subgraphs, and
//! ports (which are parsed and discarded). Subgraphs as edge endpoints are
//! rejected. Default attribute statements are recorded on the graph but not
//! copied onto individual nodes or edges.

use super::lexer::{tokenize, Token, TokenKind};
use crate::core::{Error, Result};
use crate::graph::{Attributes, Pdg, Subgraph};

pub fn parse_dot(input: &str) -> Result<Pdg> {
    let tokens = tokenize(input)?;
    Parser { tokens, pos: 0 }.graph()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn graph(mut self) -> Result<Pdg> {
        let strict = self.eat_keyword("strict");
        let directed = if self.eat_keyword("digraph") {
            true
        } else if self.eat_keyword("graph") {
            false
        } else {
            return Err(self.error("expected 'graph' or 'digraph'"));
        };

        let mut pdg = Pdg::new(directed);
        pdg.set_strict(strict);
        if let Some(name) = self.eat_id() {
            pdg = pdg.with_name(name);
        }

        self.expect(TokenKind::LBrace, "'{'")?;
        let mut root = Subgraph::default();
        self.stmt_list(&mut pdg, &mut root)?;
        self.expect(TokenKind::RBrace, "'}'")?;

        if let Some(token) = self.peek() {
            return Err(Error::dot_syntax(
                token.line,
                "unexpected content after graph body",
            ));
        }

        for (key, value) in root.attributes {
            pdg.set_graph_attribute(key, value);
        }
        for subgraph in root.subgraphs {
            pdg.add_subgraph(subgraph);
        }
        Ok(pdg)
    }

    fn stmt_list(&mut self, pdg: &mut Pdg, scope: &mut Subgraph) -> Result<()> {
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::RBrace {
                return Ok(());
            }
            self.stmt(pdg, scope)?;
            self.eat(&TokenKind::Semicolon);
        }
        Err(self.error("unexpected end of input, expected '}'"))
    }

    fn stmt(&mut self, pdg: &mut Pdg, scope: &mut Subgraph) -> Result<()> {
        if self.eat_keyword("graph") {
            let attrs = self.attr_lists()?;
            scope.attributes.extend(attrs);
            return Ok(());
        }
        if self.eat_keyword("node") {
            let attrs = self.attr_lists()?;
            pdg.extend_node_defaults(attrs);
            return Ok(());
        }
        if self.eat_keyword("edge") {
            let attrs = self.attr_lists()?;
            pdg.extend_edge_defaults(attrs);
            return Ok(());
        }
        if self.at_keyword("subgraph") || self.at(&TokenKind::LBrace) {
            let subgraph = self.subgraph(pdg)?;
            if self.at(&TokenKind::EdgeOp) {
                return Err(self.error("subgraphs as edge endpoints are not supported"));
            }
            scope.subgraphs.push(subgraph);
            return Ok(());
        }

        let first = self
            .eat_id()
            .ok_or_else(|| self.error("expected a statement"))?;

        if self.eat(&TokenKind::Equals) {
            let value = self
                .eat_id()
                .ok_or_else(|| self.error("expected a value after '='"))?;
            scope.attributes.insert(first, value);
            return Ok(());
        }

        self.skip_port()?;
        let mut chain = vec![first];
        while self.eat(&TokenKind::EdgeOp) {
            if self.at_keyword("subgraph") || self.at(&TokenKind::LBrace) {
                return Err(self.error("subgraphs as edge endpoints are not supported"));
            }
            let next = self
                .eat_id()
                .ok_or_else(|| self.error("expected a node id after edge operator"))?;
            self.skip_port()?;
            chain.push(next);
        }

        let attrs = self.attr_lists()?;
        if chain.len() == 1 {
            pdg.add_node(&chain[0], attrs);
        } else {
            for pair in chain.windows(2) {
                pdg.add_edge(&pair[0], &pair[1], attrs.clone());
            }
        }
        for id in chain {
            if !scope.members.contains(&id) {
                scope.members.push(id);
            }
        }
        Ok(())
    }

    fn subgraph(&mut self, pdg: &mut Pdg) -> Result<Subgraph> {
        let mut subgraph = Subgraph::default();
        if self.eat_keyword("subgraph") {
            subgraph.name = self.eat_id();
        }
        self.expect(TokenKind::LBrace, "'{'")?;
        self.stmt_list(pdg, &mut subgraph)?;
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(subgraph)
    }

    fn attr_lists(&mut self) -> Result<Attributes> {
        let mut attrs = Attributes::new();
        while self.eat(&TokenKind::LBracket) {
            while !self.eat(&TokenKind::RBracket) {
                let key = self
                    .eat_id()
                    .ok_or_else(|| self.error("expected attribute name"))?;
                let value = if self.eat(&TokenKind::Equals) {
                    self.eat_id()
                        .ok_or_else(|| self.error("expected attribute value"))?
                } else {
                    // A bare name is shorthand for `name=true`.
                    "true".to_string()
                };
                attrs.insert(key, value);
                if !self.eat(&TokenKind::Comma) {
                    self.eat(&TokenKind::Semicolon);
                }
            }
        }
        Ok(attrs)
    }

    fn skip_port(&mut self) -> Result<()> {
        for _ in 0..2 {
            if !self.eat(&TokenKind::Colon) {
                break;
            }
            self.eat_id()
                .ok_or_else(|| self.error("expected port name after ':'"))?;
        }
        Ok(())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|t| &t.kind == kind)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| {
            !t.quoted && matches!(&t.kind, TokenKind::Id(id) if id.eq_ignore_ascii_case(keyword))
        })
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_id(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Id(id),
                ..
            }) => {
                let id = id.clone();
                self.pos += 1;
                Some(id)
            }
            _ => None,
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(self.error(&format!("expected {what}")))
        }
    }

    fn error(&self, message: &str) -> Error {
        let line = self
            .peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1);
        Error::dot_syntax(line, message)
    }
}
