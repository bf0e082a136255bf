//! Markdown rendering of a vocabulary and its extensions.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use navocab_store::defaults::FALLBACK_ROOT_PATH_LEN;
use navocab_store::{
    find_concept, Concept, ConceptRepository, Error, Result, VocabularyRepository,
    VocabularyStore,
};

/// `top` and everything below it in `concepts`, pre-order, with `top` at
/// depth `level`. Narrower links to concepts missing from the list are
/// skipped, as is re-entering a concept already on the current branch.
pub fn concept_tree<'a>(
    top: &'a Concept,
    concepts: &'a [Concept],
    level: usize,
) -> Vec<(&'a Concept, usize)> {
    let mut out = Vec::new();
    let mut stack = vec![(top, level, Vec::<&str>::new())];
    while let Some((concept, depth, mut path)) = stack.pop() {
        out.push((concept, depth));
        path.push(concept.uri.as_str());
        for uri in concept.narrower.iter().rev() {
            if path.contains(&uri.as_str()) {
                continue;
            }
            if let Some(child) = find_concept(uri, concepts) {
                stack.push((child, depth + 1, path.clone()));
            }
        }
    }
    out
}

fn links(uris: &[String], concepts: &[Concept]) -> Vec<String> {
    uris.iter()
        .filter_map(|uri| find_concept(uri, concepts))
        .map(|c| c.md_link(true))
        .collect()
}

/// Markdown section describing one concept, headed at `level`.
pub fn describe_concept(
    store: &VocabularyStore,
    concept: &Concept,
    level: usize,
    is_top_concept: bool,
    concepts: &[Concept],
) -> Result<Vec<String>> {
    let mut res = vec![
        format!("{} {}", "#".repeat(level), concept.display_label()),
        format!("[]{{#{}}}", concept.md_anchor()),
        String::new(),
        format!("URI `{}` <br/> ", concept.uri),
        format!(
            "defined in vocabulary `{}`",
            concept.vocabulary.as_deref().unwrap_or_default()
        ),
        String::new(),
    ];

    if is_top_concept {
        res.push("This is a top concept of the vocabulary.".to_string());
    } else {
        res.push("Path from the top concept: ".to_string());
        let path = store.root_path(&concept.uri)?;
        res.push(links(&path, concepts).join("` -> `"));
    }
    res.push(String::new());
    res.push(String::new());

    if !concept.narrower.is_empty() {
        res.push("Immediately narrower concepts: ".to_string());
        res.push(links(&concept.narrower, concepts).join(", "));
    }

    res.push(String::new());
    res.push("**Definition: **".to_string());
    res.push(concept.definition.replace('\n', " <br/> "));
    res.push(String::new());

    if !concept.notes.is_empty() {
        res.push("**Notes: **".to_string());
        let notes: Vec<String> = concept
            .notes
            .iter()
            .map(|n| n.replace('\n', " <br/> "))
            .collect();
        res.push(notes.join("\n\n"));
        res.push(String::new());
    }

    let alt_labels = concept.alt_labels();
    if !alt_labels.is_empty() {
        res.push("**Alternate labels: **".to_string());
        let quoted: Vec<String> = alt_labels.iter().map(|l| format!("`{}`", l)).collect();
        res.push(quoted.join(", "));
        res.push(String::new());
    }

    for (heading, values) in [
        ("**History: **", &concept.history),
        ("**Sources: **", &concept.sources),
        ("**Example: **", &concept.example),
    ] {
        if !values.is_empty() {
            res.push(heading.to_string());
            res.push(values.join(" <br/> "));
            res.push(String::new());
        }
    }
    Ok(res)
}

/// Declared top concepts, `None` when the store has none.
fn top_concepts(store: &VocabularyStore) -> Result<Option<Vec<Concept>>> {
    match store.top_concept() {
        Ok(top) => {
            debug!(top_concept_count = top.len(), "Found top concepts");
            Ok(Some(top))
        }
        Err(Error::NoTopConcept) => {
            warn!("No top level concept found");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Concepts with a short broader lineage, used as roots when no top concept
/// is declared.
fn fallback_roots(store: &VocabularyStore, concepts: &[Concept]) -> Result<Vec<Concept>> {
    let mut roots = Vec::new();
    for concept in concepts {
        let lineage = store
            .walk_broader(&concept.uri, 0)
            .take(FALLBACK_ROOT_PATH_LEN)
            .collect::<Result<Vec<_>>>()?;
        if lineage.len() < FALLBACK_ROOT_PATH_LEN {
            roots.push(concept.clone());
        }
    }
    Ok(roots)
}

/// Render `vocabulary` and the vocabularies extending it as a markdown
/// document. `generated` is written into the front matter.
#[instrument(
    skip(store, generated),
    fields(subsystem = "render", component = "markdown", op = "describe_vocabulary")
)]
pub fn describe_vocabulary(
    store: &VocabularyStore,
    vocabulary: &str,
    generated: DateTime<Utc>,
) -> Result<Vec<String>> {
    let vocab = store.vocabulary(vocabulary)?;
    let mut res = vec![
        "---".to_string(),
        "comment: | \n  WARNING: This file is generated. Any edits will be lost!".to_string(),
        format!("title: \"{}\"", vocab.label.trim()),
        format!("date: \"{}\"", generated.to_rfc3339()),
        "subtitle: |".to_string(),
    ];
    for row in vocab.description.split('\n') {
        res.push(format!("  {}", row));
    }
    res.extend(
        ["execute:", "  echo: false", "---", "", "Vocabularies and extensions: ", ""]
            .map(String::from),
    );

    for step in store.walk_vocab_tree(&vocab.uri, 0) {
        let (uri, depth) = step?;
        let v = store.vocabulary(&uri)?;
        res.push(format!("{}- `{}` [`{}`]({})", "  ".repeat(depth), v.label, v.uri, v.uri));
    }

    res.extend(["", "**History:**", ""].map(String::from));
    for history in &vocab.history {
        res.push(format!("* {}", history));
    }
    res.extend(["", "**Concept Hierarchy:**", ""].map(String::from));

    let concepts = store.concept_list(None)?;
    let roots = match top_concepts(store)? {
        Some(top) => top,
        None => {
            res.extend(
                [
                    "> **Note**",
                    "> No top level concept is available in the loaded vocabularies. ",
                    "> Hierarchy is generated from the broadest concepts available.",
                    "",
                ]
                .map(String::from),
            );
            fallback_roots(store, &concepts)?
        }
    };

    for root in &roots {
        for (concept, level) in concept_tree(root, &concepts, 1) {
            res.push(format!(
                "{}- [{}](#{})",
                "  ".repeat(level),
                concept.display_label(),
                concept.md_anchor()
            ));
        }
        res.push(String::new());
        res.push(String::new());
    }

    for root in &roots {
        res.extend(describe_concept(store, root, 2, true, &concepts)?);
        res.push(String::new());
        for step in store.walk_narrower(&root.uri, 3) {
            let (uri, level) = step?;
            if let Some(concept) = find_concept(&uri, &concepts) {
                res.extend(describe_concept(store, concept, level, false, &concepts)?);
                res.push(String::new());
            }
        }
    }
    Ok(res)
}
