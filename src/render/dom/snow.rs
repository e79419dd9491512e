//! Snowfall DOM layer: one `div.snowflake` per generated parameter set.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use web_sys::{AnimationEvent, Document, Element, HtmlElement};

use crate::error::{AdventError, Result};
use crate::snowfall::{FlakeGenerator, FlakeParams, SnowfallConfig};

use super::modal::element_by_id;

pub(crate) struct SnowfallView {
    document: Document,
    container: HtmlElement,
    generator: FlakeGenerator<SmallRng>,
}

impl SnowfallView {
    /// Find the snowfall container, creating it at the end of `<body>` if
    /// the page has none.
    pub(crate) fn mount(
        document: &Document,
        id: &str,
        config: SnowfallConfig,
        is_mobile: bool,
    ) -> Result<Self> {
        let container = match element_by_id::<HtmlElement>(document, id) {
            Some(existing) => existing,
            None => {
                let created: HtmlElement = document.create_element("div")?.dyn_into().map_err(|_| {
                    AdventError::Dom("created snowfall container is not an HTMLElement".to_string())
                })?;
                created.set_id(id);
                let _ = created.set_attribute("aria-hidden", "true");
                let body = document
                    .body()
                    .ok_or_else(|| AdventError::Dom("document has no body".to_string()))?;
                body.append_child(&created)?;
                created
            }
        };

        Ok(Self {
            document: document.clone(),
            container,
            generator: FlakeGenerator::new(SmallRng::from_entropy(), config, is_mobile),
        })
    }

    pub(crate) fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Remove every flake and create a fresh set for the given profile.
    pub(crate) fn rebuild(&mut self, is_mobile: bool) -> Result<()> {
        self.generator.set_mobile(is_mobile);
        self.container.set_inner_html("");
        let count = self.generator.target_count();
        for _ in 0..count {
            let params = self.generator.next_flake();
            let flake = build_flake(&self.document, &params)?;
            self.container.append_child(&flake)?;
        }
        tracing::debug!(count, is_mobile, "snowfall rebuilt");
        Ok(())
    }

    /// Replace a flake whose fall animation just ended.
    ///
    /// Ignores other animations (the drift keyframes end too) and events
    /// from elements that are not flakes. Returns true if a flake was
    /// recycled.
    pub(crate) fn recycle(&mut self, event: &AnimationEvent) -> bool {
        if event.animation_name() != self.generator.config().animation_name {
            return false;
        }
        let Some(node) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        else {
            return false;
        };
        if !node.class_list().contains("snowflake") {
            return false;
        }

        let params = self.generator.next_flake();
        let replaced = build_flake(&self.document, &params).and_then(|fresh| {
            let parent = node
                .parent_node()
                .ok_or_else(|| AdventError::Dom("flake is detached".to_string()))?;
            parent.replace_child(&fresh, &node)?;
            Ok(())
        });
        if let Err(err) = replaced {
            tracing::debug!(%err, "flake replace failed, restarting in place");
            restart_in_place(&node, &params);
        }
        true
    }
}

fn build_flake(document: &Document, params: &FlakeParams) -> Result<HtmlElement> {
    let element: Element = document.create_element("div")?;
    let flake: HtmlElement = element
        .dyn_into()
        .map_err(|_| AdventError::Dom("created flake is not an HTMLElement".to_string()))?;
    flake.set_class_name(&params.classes().join(" "));
    flake.set_text_content(Some(&params.glyph.to_string()));
    apply_params(&flake, params);
    Ok(flake)
}

fn apply_params(flake: &HtmlElement, params: &FlakeParams) {
    let style = flake.style();
    for (name, value) in params.css_variables() {
        let _ = style.set_property(name, &value);
    }
    let _ = style.set_property("font-size", "var(--flake-size)");
    let _ = style.set_property("left", &format!("{:.3}%", params.left_percent));
    let _ = style.set_property("opacity", &format!("{:.2}", params.opacity));
    let _ = style.set_property("transform", &params.transform());
}

/// Fallback when the node cannot be swapped: new parameters on the same
/// element, then drop and re-add the classes so the animation restarts.
fn restart_in_place(flake: &HtmlElement, params: &FlakeParams) {
    apply_params(flake, params);
    flake.set_class_name("");
    // Reading layout forces a reflow between the two class assignments.
    let _ = flake.offset_width();
    flake.set_class_name(&params.classes().join(" "));
}
