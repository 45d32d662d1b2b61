use crate::models::HABIT_COLORS;

/// Fills the dashboard shell. All habit data arrives through the JSON API;
/// only identity and the color palette are baked into the page.
pub fn render_index(user_id: &str) -> String {
    let palette = serde_json::to_string(&HABIT_COLORS).unwrap_or_else(|_| "[]".to_string());
    INDEX_HTML
        .replace("{{USER}}", user_id)
        .replace("{{COLORS}}", &palette)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Dashboard</title>
  <style>
    :root {
      --bg-1: #f8f6f1;
      --bg-2: #e8ecf7;
      --ink: #22252b;
      --accent: #3b82f6;
      --good: #10b981;
      --muted: #6f7480;
      --card: #ffffff;
      --line: rgba(34, 37, 43, 0.08);
      --shadow: 0 18px 44px rgba(34, 37, 43, 0.10);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      padding: 28px 20px 48px;
    }

    .app {
      width: min(1180px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 22px;
    }

    header.top {
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      justify-content: space-between;
      gap: 12px;
    }

    h1 { margin: 0; font-size: 1.7rem; }
    .subtitle { margin: 0; color: var(--muted); font-size: 0.95rem; }

    .month-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      background: var(--card);
      border-radius: 16px;
      border: 1px solid var(--line);
      box-shadow: var(--shadow);
      padding: 12px 16px;
    }

    .month-nav h2 { margin: 0; font-size: 1.2rem; }

    button {
      appearance: none;
      border: none;
      border-radius: 10px;
      padding: 9px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.ghost {
      background: transparent;
      color: var(--accent);
      border: 1px solid var(--accent);
    }

    button:disabled { opacity: 0.4; cursor: not-allowed; }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 14px;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 14px 16px;
      box-shadow: var(--shadow);
    }

    .card .label {
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .card .value { font-size: 1.5rem; font-weight: 700; margin-top: 4px; }

    .calendar-wrap {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 16px;
      overflow-x: auto;
    }

    table { border-collapse: collapse; width: 100%; font-size: 0.85rem; }

    th, td { padding: 4px 5px; text-align: center; white-space: nowrap; }

    th.habit-col, td.habit-col { text-align: left; min-width: 160px; }

    th.day.today { color: var(--accent); }

    td.cell button.mark {
      width: 22px;
      height: 22px;
      border-radius: 6px;
      padding: 0;
      border: 2px solid var(--muted);
      background: transparent;
      color: white;
      line-height: 1;
    }

    td.cell button.mark.future { opacity: 0.25; cursor: not-allowed; }

    .habit-title { font-weight: 600; }
    .habit-desc { color: var(--muted); font-size: 0.78rem; }

    .progress-track {
      background: var(--line);
      border-radius: 999px;
      height: 7px;
      width: 90px;
      overflow: hidden;
      display: inline-block;
      vertical-align: middle;
    }

    .progress-fill { height: 100%; border-radius: 999px; }

    .row-actions button { padding: 5px 9px; font-size: 0.78rem; margin-left: 4px; }
    .row-actions .danger { background: #ef4444; }

    form.editor {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 16px;
      display: grid;
      gap: 10px;
      grid-template-columns: 2fr 2fr 1fr 1fr auto auto;
      align-items: end;
    }

    form.editor label {
      display: grid;
      gap: 4px;
      font-size: 0.78rem;
      color: var(--muted);
    }

    form.editor input, form.editor select, form.editor textarea {
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 8px;
      font: inherit;
    }

    .swatches { display: flex; gap: 6px; }

    .swatch {
      width: 22px;
      height: 22px;
      border-radius: 50%;
      border: 2px solid transparent;
      padding: 0;
    }

    .swatch.selected { border-color: var(--ink); }

    .empty {
      text-align: center;
      color: var(--muted);
      padding: 28px 0;
    }

    .status { min-height: 1.2em; font-size: 0.9rem; color: var(--muted); }
    .status[data-type="error"] { color: #c63b2b; }
    .status[data-type="ok"] { color: #2d7a4b; }

    @media (max-width: 760px) {
      form.editor { grid-template-columns: 1fr 1fr; }
    }
  </style>
</head>
<body>
  <main class="app">
    <header class="top">
      <div>
        <h1>Habit Dashboard</h1>
        <p class="subtitle">Signed in as <strong>{{USER}}</strong></p>
      </div>
      <p class="subtitle" id="habit-count"></p>
    </header>

    <div class="month-nav">
      <button class="ghost" id="prev-month" type="button">&#8592; Previous</button>
      <div>
        <h2 id="month-label">Loading&#8230;</h2>
      </div>
      <div>
        <button class="ghost" id="go-today" type="button">Today</button>
        <button class="ghost" id="next-month" type="button">Next &#8594;</button>
      </div>
    </div>

    <section class="cards" id="stat-cards"></section>

    <section class="calendar-wrap">
      <table id="calendar"></table>
    </section>

    <section class="cards" id="summary-cards"></section>

    <form class="editor" id="habit-form">
      <label>Title
        <input id="f-title" type="text" placeholder="e.g. Morning run" required />
      </label>
      <label>Description
        <input id="f-desc" type="text" placeholder="optional" />
      </label>
      <label>Frequency
        <select id="f-freq">
          <option value="daily">daily</option>
          <option value="weekly">weekly</option>
          <option value="monthly">monthly</option>
        </select>
      </label>
      <label>Color
        <div class="swatches" id="f-colors"></div>
      </label>
      <button type="submit" id="f-submit">Add habit</button>
      <button class="ghost" type="button" id="f-cancel" hidden>Cancel</button>
    </form>

    <div class="status" id="status"></div>
  </main>

  <script>
    const PALETTE = {{COLORS}};
    let dashboard = null;
    let currentMonth = null;
    let editingId = null;
    let selectedColor = PALETTE[Math.floor(Math.random() * PALETTE.length)];

    const statusEl = document.getElementById('status');
    const calendarEl = document.getElementById('calendar');
    const monthLabelEl = document.getElementById('month-label');
    const statCardsEl = document.getElementById('stat-cards');
    const summaryCardsEl = document.getElementById('summary-cards');
    const form = document.getElementById('habit-form');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        let message = 'Request failed';
        try { message = (await res.json()).message || message; } catch (_) {}
        throw new Error(message);
      }
      return res.json();
    };

    const monthParam = () => currentMonth ? ('?month=' + currentMonth) : '';

    const card = (label, value) =>
      `<div class="card"><div class="label">${label}</div><div class="value">${value}</div></div>`;

    const renderCards = () => {
      const s = dashboard.stats;
      statCardsEl.innerHTML =
        card('Total habits', s.total_habits) +
        card('Completed today', s.completed_today) +
        card('Current streak', s.total_streak) +
        card('Longest streak', s.longest_streak) +
        card('Success rate', s.success_rate + '%') +
        card("Today's completion", dashboard.today_completion + '%');
      const m = dashboard.summary;
      summaryCardsEl.innerHTML =
        card('Monthly progress', m.monthly_progress + '%') +
        card('Normalized progress', m.normalized_progress + '%') +
        card('Cells completed', `${m.total_completed} / ${m.total_possible}`);
    };

    const escapeHtml = (value) =>
      String(value ?? '').replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;');

    // Colors are free-form provider text; only hex values reach the markup.
    const safeColor = (value) =>
      /^#[0-9a-fA-F]{3,8}$/.test(String(value ?? '')) ? value : PALETTE[0];

    const renderTable = () => {
      const view = dashboard.view;
      let head = '<tr><th class="habit-col">Habit</th><th>Freq</th>';
      for (const day of view.days) {
        head += `<th class="day${day.is_today ? ' today' : ''}">` +
          `<div>${day.day_of_month}</div><div>${day.weekday}</div></th>`;
      }
      head += '<th>Progress</th><th>Streak</th><th></th></tr>';

      if (view.rows.length === 0) {
        calendarEl.innerHTML = head +
          `<tr><td colspan="${view.days.length + 5}" class="empty">No habits yet. Add your first one below.</td></tr>`;
        return;
      }

      let body = '';
      for (const row of view.rows) {
        const color = safeColor(row.color);
        body += '<tr>';
        body += `<td class="habit-col"><div class="habit-title">${escapeHtml(row.title)}</div>` +
          (row.description ? `<div class="habit-desc">${escapeHtml(row.description)}</div>` : '') + '</td>';
        body += `<td>${row.frequency}</td>`;
        for (const cell of row.cells) {
          const mark = cell.completed ? '&#10003;' : '';
          const style = cell.completed
            ? `background:${color};border-color:${color}`
            : `border-color:${color}`;
          body += `<td class="cell"><button type="button" class="mark${cell.is_future ? ' future' : ''}" ` +
            `style="${style}" data-habit="${row.id}" data-date="${cell.date}" ` +
            `${cell.is_future ? 'disabled' : ''}>${mark}</button></td>`;
        }
        body += `<td>${row.progress}% <span class="progress-track">` +
          `<span class="progress-fill" style="width:${row.progress}%;background:${color}"></span></span></td>`;
        body += `<td>${row.current_streak} / ${row.longest_streak}</td>`;
        body += `<td class="row-actions">` +
          `<button type="button" class="ghost" data-edit="${row.id}">Edit</button>` +
          `<button type="button" class="danger" data-delete="${row.id}">Delete</button></td>`;
        body += '</tr>';
      }
      calendarEl.innerHTML = head + body;
    };

    const render = () => {
      monthLabelEl.textContent = dashboard.view.label;
      document.getElementById('habit-count').textContent =
        `${dashboard.view.rows.length} habits - ${dashboard.view.label}`;
      renderCards();
      renderTable();
    };

    const apply = (data) => {
      dashboard = data;
      currentMonth = data.month;
      render();
    };

    const load = async () => {
      apply(await api('/api/dashboard' + monthParam()));
    };

    const renderSwatches = () => {
      const holder = document.getElementById('f-colors');
      holder.innerHTML = '';
      for (const color of PALETTE) {
        const btn = document.createElement('button');
        btn.type = 'button';
        btn.className = 'swatch' + (color === selectedColor ? ' selected' : '');
        btn.style.background = color;
        btn.addEventListener('click', () => {
          selectedColor = color;
          renderSwatches();
        });
        holder.appendChild(btn);
      }
    };

    const resetForm = () => {
      editingId = null;
      form.reset();
      selectedColor = PALETTE[Math.floor(Math.random() * PALETTE.length)];
      document.getElementById('f-submit').textContent = 'Add habit';
      document.getElementById('f-cancel').hidden = true;
      renderSwatches();
    };

    const startEdit = (id) => {
      const row = dashboard.view.rows.find((r) => r.id === id);
      if (!row) return;
      editingId = id;
      document.getElementById('f-title').value = row.title;
      document.getElementById('f-desc').value = row.description || '';
      document.getElementById('f-freq').value = row.frequency;
      selectedColor = row.color;
      document.getElementById('f-submit').textContent = 'Save changes';
      document.getElementById('f-cancel').hidden = false;
      renderSwatches();
    };

    calendarEl.addEventListener('click', (event) => {
      const target = event.target.closest('button');
      if (!target) return;
      if (target.dataset.habit) {
        target.disabled = true;
        api(`/api/habits/${target.dataset.habit}/toggle${monthParam()}`, {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ date: target.dataset.date })
        }).then(apply).then(() => setStatus('Saved', 'ok'))
          .catch((err) => { target.disabled = false; setStatus(err.message, 'error'); });
      } else if (target.dataset.edit) {
        startEdit(target.dataset.edit);
      } else if (target.dataset.delete) {
        if (!confirm('Delete this habit and all of its history?')) return;
        api(`/api/habits/${target.dataset.delete}${monthParam()}`, { method: 'DELETE' })
          .then(apply).then(() => setStatus('Habit deleted', 'ok'))
          .catch((err) => setStatus(err.message, 'error'));
      }
    });

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const payload = {
        title: document.getElementById('f-title').value,
        description: document.getElementById('f-desc').value,
        frequency: document.getElementById('f-freq').value,
        color: selectedColor
      };
      const path = editingId
        ? `/api/habits/${editingId}${monthParam()}`
        : `/api/habits${monthParam()}`;
      api(path, {
        method: editingId ? 'PUT' : 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      }).then(apply).then(() => {
        setStatus(editingId ? 'Habit updated' : 'Habit created', 'ok');
        resetForm();
      }).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('f-cancel').addEventListener('click', resetForm);

    document.getElementById('prev-month').addEventListener('click', () => {
      currentMonth = dashboard.prev_month;
      load().catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('next-month').addEventListener('click', () => {
      currentMonth = dashboard.next_month;
      load().catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('go-today').addEventListener('click', () => {
      currentMonth = null;
      load().catch((err) => setStatus(err.message, 'error'));
    });

    renderSwatches();
    load().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
