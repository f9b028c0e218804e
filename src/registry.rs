use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::analysis::contains_word;

/// Built-in Jetpack Compose / Kotlin symbol table.
pub const BUILTIN_SYMBOLS: &[(&str, &str)] = &[
    // Layout (foundation.layout)
    ("Column", "import androidx.compose.foundation.layout.Column"),
    ("Row", "import androidx.compose.foundation.layout.Row"),
    ("Box", "import androidx.compose.foundation.layout.Box"),
    ("Spacer", "import androidx.compose.foundation.layout.Spacer"),
    ("fillMaxSize", "import androidx.compose.foundation.layout.fillMaxSize"),
    ("fillMaxWidth", "import androidx.compose.foundation.layout.fillMaxWidth"),
    ("fillMaxHeight", "import androidx.compose.foundation.layout.fillMaxHeight"),
    ("wrapContentSize", "import androidx.compose.foundation.layout.wrapContentSize"),
    ("padding", "import androidx.compose.foundation.layout.padding"),
    ("size", "import androidx.compose.foundation.layout.size"),
    ("width", "import androidx.compose.foundation.layout.width"),
    ("height", "import androidx.compose.foundation.layout.height"),
    ("background", "import androidx.compose.foundation.background"),
    ("weight", "import androidx.compose.foundation.layout.weight"),
    ("AspectRatio", "import androidx.compose.foundation.layout.aspectRatio"),
    ("FlowRow", "import androidx.compose.foundation.layout.FlowRow"),
    ("FlowColumn", "import androidx.compose.foundation.layout.FlowColumn"),
    // Foundation
    ("Image", "import androidx.compose.foundation.Image"),
    ("BasicText", "import androidx.compose.foundation.text.BasicText"),
    ("BasicTextField", "import androidx.compose.foundation.text.BasicTextField"),
    ("ClickableText", "import androidx.compose.foundation.text.ClickableText"),
    ("LazyColumn", "import androidx.compose.foundation.lazy.LazyColumn"),
    ("LazyRow", "import androidx.compose.foundation.lazy.LazyRow"),
    ("items", "import androidx.compose.foundation.lazy.items"),
    ("itemsIndexed", "import androidx.compose.foundation.lazy.itemsIndexed"),
    (
        "rememberLazyListState",
        "import androidx.compose.foundation.lazy.rememberLazyListState",
    ),
    ("verticalScroll", "import androidx.compose.foundation.verticalScroll"),
    ("horizontalScroll", "import androidx.compose.foundation.horizontalScroll"),
    ("rememberScrollState", "import androidx.compose.foundation.rememberScrollState"),
    ("BorderStroke", "import androidx.compose.foundation.BorderStroke"),
    // Material3
    ("Button", "import androidx.compose.material3.Button"),
    ("Text", "import androidx.compose.material3.Text"),
    ("Surface", "import androidx.compose.material3.Surface"),
    ("MaterialTheme", "import androidx.compose.material3.MaterialTheme"),
    ("OutlinedTextField", "import androidx.compose.material3.OutlinedTextField"),
    ("TextField", "import androidx.compose.material3.TextField"),
    ("Scaffold", "import androidx.compose.material3.Scaffold"),
    ("TopAppBar", "import androidx.compose.material3.TopAppBar"),
    ("Card", "import androidx.compose.material3.Card"),
    ("AlertDialog", "import androidx.compose.material3.AlertDialog"),
    ("Checkbox", "import androidx.compose.material3.Checkbox"),
    ("Switch", "import androidx.compose.material3.Switch"),
    ("RadioButton", "import androidx.compose.material3.RadioButton"),
    ("Slider", "import androidx.compose.material3.Slider"),
    (
        "LinearProgressIndicator",
        "import androidx.compose.material3.LinearProgressIndicator",
    ),
    (
        "CircularProgressIndicator",
        "import androidx.compose.material3.CircularProgressIndicator",
    ),
    (
        "FloatingActionButton",
        "import androidx.compose.material3.FloatingActionButton",
    ),
    ("Icon", "import androidx.compose.material3.Icon"),
    ("IconButton", "import androidx.compose.material3.IconButton"),
    ("DropdownMenu", "import androidx.compose.material3.DropdownMenu"),
    ("DropdownMenuItem", "import androidx.compose.material3.DropdownMenuItem"),
    ("SnackbarHost", "import androidx.compose.material3.SnackbarHost"),
    ("SnackbarHostState", "import androidx.compose.material3.SnackbarHostState"),
    // Runtime
    ("Composable", "import androidx.compose.runtime.Composable"),
    ("remember", "import androidx.compose.runtime.remember"),
    ("mutableStateOf", "import androidx.compose.runtime.mutableStateOf"),
    ("mutableIntStateOf", "import androidx.compose.runtime.mutableIntStateOf"),
    ("mutableLongStateOf", "import androidx.compose.runtime.mutableLongStateOf"),
    ("mutableFloatStateOf", "import androidx.compose.runtime.mutableFloatStateOf"),
    ("LaunchedEffect", "import androidx.compose.runtime.LaunchedEffect"),
    ("SideEffect", "import androidx.compose.runtime.SideEffect"),
    ("DisposableEffect", "import androidx.compose.runtime.DisposableEffect"),
    (
        "rememberCoroutineScope",
        "import androidx.compose.runtime.rememberCoroutineScope",
    ),
    ("getValue", "import androidx.compose.runtime.getValue"),
    ("setValue", "import androidx.compose.runtime.setValue"),
    (
        "rememberSaveable",
        "import androidx.compose.runtime.saveable.rememberSaveable",
    ),
    ("produceState", "import androidx.compose.runtime.produceState"),
    ("derivedStateOf", "import androidx.compose.runtime.derivedStateOf"),
    // UI core
    ("Modifier", "import androidx.compose.ui.Modifier"),
    ("Alignment", "import androidx.compose.ui.Alignment"),
    ("Color", "import androidx.compose.ui.graphics.Color"),
    ("Brush", "import androidx.compose.ui.graphics.Brush"),
    ("Shape", "import androidx.compose.ui.graphics.Shape"),
    ("CircleShape", "import androidx.compose.foundation.shape.CircleShape"),
    (
        "RoundedCornerShape",
        "import androidx.compose.foundation.shape.RoundedCornerShape",
    ),
    ("sp", "import androidx.compose.ui.unit.sp"),
    ("dp", "import androidx.compose.ui.unit.dp"),
    ("IntOffset", "import androidx.compose.ui.unit.IntOffset"),
    ("IntSize", "import androidx.compose.ui.unit.IntSize"),
    // Animation
    (
        "animateFloatAsState",
        "import androidx.compose.animation.core.animateFloatAsState",
    ),
    ("tween", "import androidx.compose.animation.core.tween"),
    ("spring", "import androidx.compose.animation.core.spring"),
    ("keyframes", "import androidx.compose.animation.core.keyframes"),
    (
        "InfiniteTransition",
        "import androidx.compose.animation.core.InfiniteTransition",
    ),
    (
        "rememberInfiniteTransition",
        "import androidx.compose.animation.core.rememberInfiniteTransition",
    ),
    // Activity
    ("Bundle", "import android.os.Bundle"),
    ("ComponentActivity", "import androidx.activity.ComponentActivity"),
    ("setContent", "import androidx.activity.compose.setContent"),
    ("Context", "import android.content.Context"),
    ("Intent", "import android.content.Intent"),
    // Tooling
    ("Preview", "import androidx.compose.ui.tooling.preview.Preview"),
];

static BUILTIN: Lazy<SymbolRegistry> = Lazy::new(|| SymbolRegistry {
    entries: BUILTIN_SYMBOLS
        .iter()
        .map(|(symbol, statement)| {
            (
                symbol.to_string(),
                SymbolEntry {
                    symbol: symbol.to_string(),
                    statement: statement.to_string(),
                },
            )
        })
        .collect(),
});

/// A symbol and the import statement that brings it into scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub symbol: String,
    pub statement: String,
}

impl SymbolEntry {
    /// True when the symbol occurs as a whole identifier in `text`.
    pub fn occurs_in(&self, text: &str) -> bool {
        contains_word(text, &self.symbol)
    }
}

/// Immutable symbol -> import statement table.
///
/// Keys are unique and iteration follows key order, which keeps the change
/// list produced by the detector deterministic.
#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
    entries: BTreeMap<String, SymbolEntry>,
}

// --- Raw TOML structure ---
#[derive(Deserialize)]
struct RegistryFile {
    symbols: BTreeMap<String, String>,
}

impl SymbolRegistry {
    /// Process-wide built-in table, built on first use.
    pub fn builtin() -> &'static SymbolRegistry {
        &BUILTIN
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut registry = Self::default();
        registry.merge(pairs)?;
        Ok(registry)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RegistryFile =
            toml::from_str(content).context("failed to parse registry table")?;
        Self::from_pairs(file.symbols)
    }

    /// Load a registry file containing a `[symbols]` table.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid registry file {}", path.display()))
    }

    /// Return a new registry with `overrides` layered on top of this one.
    pub fn with_overrides<I, K, V>(&self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut registry = self.clone();
        registry.merge(overrides)?;
        Ok(registry)
    }

    fn merge<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (symbol, statement) in pairs {
            let symbol = symbol.into();
            let statement = statement.into().trim().to_string();
            validate(&symbol, &statement)?;
            self.entries
                .insert(symbol.clone(), SymbolEntry { symbol, statement });
        }
        Ok(())
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolEntry> {
        self.entries.get(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate(symbol: &str, statement: &str) -> Result<()> {
    let mut chars = symbol.chars();
    let valid_symbol = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_');
    if !valid_symbol {
        bail!("invalid symbol name: {:?}", symbol);
    }
    match statement.strip_prefix("import") {
        Some(rest) if rest.starts_with(char::is_whitespace) && !rest.trim().is_empty() => Ok(()),
        _ => bail!("statement for {} must start with `import `: {:?}", symbol, statement),
    }
}
