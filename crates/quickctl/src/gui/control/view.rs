use super::model::{ControlState, Layout, SlotContent, SlotPlacement};
use super::{ICON_FILL, SLOT_SIZE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use quickctl_core::{Rect, SlotFrame};
use std::f64::consts::PI;
use std::iter::zip;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, rect: &Rect, radius: f64) {
    let (x, y, w, h) = (rect.origin.x, rect.origin.y, rect.size.width, rect.size.height);
    let r = radius.min(w / 2.0).min(h / 2.0);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

/// Paints `pixbuf` centered on the current origin, fitted into a `box_size` square.
fn paint_icon(cr: &Context, pixbuf: &Pixbuf, box_size: f64) -> Result<(), cairo::Error> {
    let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
    let icon_scale = box_size / pw.max(ph);

    cr.save()?;
    cr.scale(icon_scale, icon_scale);
    cr.set_source_pixbuf(pixbuf, -pw / 2.0, -ph / 2.0);
    cr.paint()?;
    cr.restore()
}

struct HandleRenderer<'a> {
    rect: &'a Rect,
    icon: Option<&'a Pixbuf>,
    expanded: bool,
}

impl HandleRenderer<'_> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_color(cr, colors.handle);
        rounded_rect(cr, self.rect, self.rect.size.width / 2.0);
        cr.fill()?;

        let center = self.rect.center();
        cr.save()?;
        cr.translate(center.x, center.y);
        match self.icon {
            Some(pixbuf) => paint_icon(cr, pixbuf, self.rect.size.width * ICON_FILL)?,
            None => self.draw_arrow(cr, colors)?,
        }
        cr.restore()
    }

    // points left while collapsed, right once expanded
    fn draw_arrow(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (dx, dy) = (self.rect.size.width * 0.15, self.rect.size.height * 0.15);
        let tip = if self.expanded { dx } else { -dx };

        set_color(cr, colors.glyph);
        cr.set_line_width(2.5);
        cr.set_line_cap(cairo::LineCap::Round);
        cr.set_line_join(cairo::LineJoin::Round);
        cr.move_to(-tip, -dy);
        cr.line_to(tip, 0.0);
        cr.line_to(-tip, dy);
        cr.stroke()
    }
}

struct SlotRenderer<'a> {
    content: &'a SlotContent,
    placement: &'a SlotPlacement,
}

impl<'a> SlotRenderer<'a> {
    fn new(slot: &SlotFrame<'a, SlotContent>, placement: &'a SlotPlacement) -> Self {
        Self {
            content: slot.content,
            placement,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let transform = &self.placement.transform;
        let center = self.placement.rect.center();

        cr.save()?;
        cr.translate(
            center.x + transform.translate.x,
            center.y + transform.translate.y,
        );
        cr.rotate(transform.rotation_degrees.to_radians());
        cr.scale(transform.scale, transform.scale);

        self.draw_circle(cr, colors)?;
        self.draw_content(cr, colors)?;
        cr.restore()
    }

    fn draw_circle(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color = if self.content.is_broken() {
            colors.broken
        } else {
            colors.slot
        };
        set_color(cr, color);
        cr.arc(0.0, 0.0, SLOT_SIZE / 2.0, 0.0, 2.0 * PI);
        cr.fill()
    }

    fn draw_content(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if let Some(pixbuf) = &self.content.pixbuf {
            paint_icon(cr, pixbuf, SLOT_SIZE * ICON_FILL)
        } else {
            self.draw_label(cr, colors)
        }
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let text = &self.content.label;
        if text.is_empty() {
            return Ok(());
        }
        set_color(cr, colors.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(10.0);
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(-ext.width() / 2.0 - ext.x_bearing(), ext.height() / 2.0);
            cr.show_text(text)?;
        }
        Ok(())
    }
}

pub fn draw(cr: &Context, state: &ControlState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let frame = state.control.frame();
    let layout = Layout::compute(&frame, state.surface, state.control.settings().top_inset);

    // the dismiss layer is transparent and only takes input
    HandleRenderer {
        rect: &layout.handle,
        icon: state.handle_icon.as_ref(),
        expanded: frame.expanded,
    }
    .draw(cr, colors)?;

    for (slot, placement) in zip(&frame.slots, &layout.slots) {
        SlotRenderer::new(slot, placement).draw(cr, colors)?;
    }
    Ok(())
}
