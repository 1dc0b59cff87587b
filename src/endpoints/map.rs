pub(super) const INDEX_HTML: &str = r#"<!DOCTYPE html>
  <html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
    <title>topotint</title>
    <link
      rel="stylesheet"
      href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"
      integrity="sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY="
      crossorigin=""
    />
    <style>
      html, body { height: 100%; margin: 0; padding: 0; }
      #map { height: 100%; width: 100%; }
      .panel {
        background: white;
        padding: 6px 8px;
        border-radius: 4px;
        box-shadow: 0 1px 4px rgba(0,0,0,0.3);
        font: 12px/1.4 sans-serif;
      }
      #readout { min-width: 220px; }
      #legend .bar {
        position: relative;
        width: 18px;
        height: 180px;
        margin-right: 44px;
        border: 1px solid #999;
      }
      #legend .tick {
        position: absolute;
        left: 24px;
        transform: translateY(50%);
        white-space: nowrap;
      }
      #legend button {
        border: none;
        background: none;
        cursor: pointer;
        font-size: 16px;
        padding: 0;
      }
    </style>
  </head>
  <body>
    <div id="map"></div>

    <script
      src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"
      integrity="sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo="
      crossorigin=""
    ></script>

    <script>
      const REDRAW_MS = 250;
      const map = L.map('map', { zoomControl: false }).setView([0, 0], 2);
      L.control.zoom({ position: 'topright' }).addTo(map);

      let opacityTarget = '';
      let overlays = [];

      // last resolved lookup wins, whatever order requests were issued in;
      // the server labels each reading with the cell it was fetched for
      let latest = null;

      function panel(position, id) {
        const control = L.control({ position });
        control.onAdd = () => {
          const div = L.DomUtil.create('div', 'panel');
          div.id = id;
          L.DomEvent.disableClickPropagation(div);
          return div;
        };
        control.addTo(map);
        return document.getElementById(id);
      }

      async function initLayers() {
        const res = await fetch('/api/layers');
        const data = await res.json();  // { layers: [{ name, kind, url, … }], opacity_target }
        opacityTarget = data.opacity_target;

        const bases = {};
        const extras = {};
        data.layers.forEach(l => {
          const opts = {
            maxZoom: l.max_zoom,
            attribution: l.attribution,
            opacity: l.opacity,
          };
          if (l.subdomains) opts.subdomains = l.subdomains;
          const layer = L.tileLayer(l.url, opts);
          if (l.kind === 'base') {
            bases[l.name] = layer;
          } else {
            layer.setZIndex(10);
            extras[l.name] = layer;
            overlays.push({ url: l.url, layer });
          }
          if (l.visible) layer.addTo(map);
        });
        L.control.layers(bases, extras, { position: 'topright' }).addTo(map);
        initOpacity();
      }

      function initOpacity() {
        const targets = overlays.filter(o => opacityTarget && o.url.includes(opacityTarget));
        if (targets.length === 0) return;
        const div = panel('topleft', 'opacity');
        div.innerHTML =
          '<label>Overlay opacity <input type="range" min="0" max="1" step="0.05"></label>';
        const slider = div.querySelector('input');
        slider.value = targets[0].layer.options.opacity;
        slider.addEventListener('input', () => {
          const value = parseFloat(slider.value);
          targets.forEach(o => o.layer.setOpacity(value));
        });
      }

      const readout = panel('bottomleft', 'readout');

      function redraw() {
        if (!latest) {
          readout.textContent = 'Elevation: –';
          return;
        }
        const where = `(${latest.lat.toFixed(4)}, ${latest.lng.toFixed(4)})`;
        readout.textContent = latest.elevation !== undefined
          ? `Elevation: ${latest.elevation} m  ${where}`
          : `Elevation: unavailable  ${where}`;
      }

      map.on('mousemove', e => {
        const { lat, lng } = e.latlng.wrap();
        fetch(`/api/elevation?lat=${lat}&lng=${lng}`)
          .then(res => res.json())  // { lat, lng, elevation } or { lat, lng, error }
          .catch(() => ({ lat, lng, error: 'unavailable' }))
          .then(reading => { latest = reading; });
      });
      setInterval(redraw, REDRAW_MS);

      const legend = panel('bottomright', 'legend');
      let collapsed = false;

      async function drawLegend() {
        const res = await fetch(`/api/legend?collapsed=${collapsed}`);
        const data = await res.json();
        legend.innerHTML = '';

        const toggle = document.createElement('button');
        toggle.title = collapsed ? 'Show legend' : 'Hide legend';
        toggle.textContent = collapsed ? data.glyph : '×';
        toggle.addEventListener('click', () => {
          collapsed = !collapsed;
          drawLegend().catch(console.error);
        });
        legend.appendChild(toggle);
        if (collapsed || !data.css) return;

        const bar = document.createElement('div');
        bar.className = 'bar';
        bar.style.background = data.css;
        data.labels.forEach(({ text, position }) => {
          const tick = document.createElement('span');
          tick.className = 'tick';
          tick.style.bottom = `${position}%`;
          tick.textContent = text;
          bar.appendChild(tick);
        });
        legend.appendChild(bar);
      }

      redraw();
      initLayers().catch(console.error);
      drawLegend().catch(console.error);
    </script>
  </body>
  </html>
"#;
