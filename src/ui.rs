use crate::stats::StatsResponse;

pub fn render_index(year: i32, stats: &StatsResponse) -> String {
    let level = &stats.level;
    INDEX_HTML
        .replace("{{YEAR}}", &year.to_string())
        .replace("{{LEVEL}}", &level.level.to_string())
        .replace("{{TIER}}", level.tier_name)
        .replace("{{TIER_COLOR}}", level.tier_color)
        .replace("{{TITLE}}", level.title)
        .replace("{{TOTAL_XP}}", &format!("{:.2}", level.progress.total_xp))
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Progress Tracker {{YEAR}}</title>
  <style>
    :root {
      --bg: #f4f1ea;
      --ink: #24232a;
      --muted: #6f6a73;
      --card: #ffffff;
      --accent: {{TIER_COLOR}};
      --line: rgba(36, 35, 42, 0.1);
      --shadow: 0 18px 44px rgba(36, 35, 42, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #ece6f7 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 28px 16px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 22px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      margin: 0;
      font-family: Georgia, serif;
      font-size: clamp(1.8rem, 4vw, 2.5rem);
    }

    .badge {
      display: flex;
      align-items: center;
      gap: 12px;
      background: var(--accent);
      color: white;
      border-radius: 999px;
      padding: 8px 18px 8px 8px;
      box-shadow: var(--shadow);
    }

    .badge .num {
      background: rgba(255, 255, 255, 0.25);
      border-radius: 50%;
      width: 44px;
      height: 44px;
      display: grid;
      place-items: center;
      font-size: 1.3rem;
      font-weight: 700;
    }

    nav {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(36, 35, 42, 0.06);
      border-radius: 999px;
      width: fit-content;
    }

    nav button {
      border: none;
      background: transparent;
      border-radius: 999px;
      padding: 8px 16px;
      font-weight: 600;
      color: var(--muted);
      cursor: pointer;
    }

    nav button.active {
      background: white;
      color: var(--ink);
      box-shadow: 0 6px 14px rgba(36, 35, 42, 0.1);
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      padding: 22px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 16px;
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    input, select, textarea {
      font: inherit;
      padding: 8px 12px;
      border-radius: 10px;
      border: 1px solid var(--line);
    }

    .btn {
      border: none;
      border-radius: 999px;
      padding: 9px 16px;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    .btn.ghost {
      background: rgba(36, 35, 42, 0.08);
      color: var(--ink);
    }

    .grid-wrap {
      overflow-x: auto;
    }

    table.tracker {
      border-collapse: collapse;
      font-size: 0.85rem;
    }

    table.tracker th, table.tracker td {
      border: 1px solid var(--line);
      padding: 4px 6px;
      text-align: center;
      white-space: nowrap;
    }

    table.tracker td.name {
      text-align: left;
      font-weight: 600;
    }

    .today {
      background: rgba(139, 92, 246, 0.12);
    }

    .stats-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
      gap: 18px;
    }

    .bar {
      height: 12px;
      background: rgba(36, 35, 42, 0.08);
      border-radius: 999px;
      overflow: hidden;
    }

    .bar > div {
      height: 100%;
      background: var(--accent);
    }

    .milestones {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .milestone {
      border-radius: 999px;
      padding: 6px 12px;
      background: rgba(36, 35, 42, 0.06);
      font-size: 0.9rem;
    }

    .overview {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 12px;
    }

    .overview div {
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 12px;
    }

    .overview strong {
      display: block;
      font-size: 1.5rem;
    }

    .bingo {
      display: grid;
      gap: 10px;
    }

    .cell {
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 10px;
      display: grid;
      gap: 6px;
    }

    .cell.checked {
      background: rgba(16, 185, 129, 0.14);
    }

    .book {
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 12px 14px;
      display: grid;
      gap: 4px;
    }

    .stars {
      color: #f59e0b;
      letter-spacing: 2px;
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    [hidden] {
      display: none !important;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Progress Tracker {{YEAR}}</h1>
      <div class="badge">
        <span class="num" id="badge-level">{{LEVEL}}</span>
        <span><strong id="badge-tier">{{TIER}}</strong> &middot; <span id="badge-title">{{TITLE}}</span><br /><small id="badge-xp">{{TOTAL_XP}} XP</small></span>
      </div>
    </header>

    <nav>
      <button type="button" data-page="tracker" class="active">Tracker</button>
      <button type="button" data-page="stats">Stats</button>
      <button type="button" data-page="goals">Goals</button>
      <button type="button" data-page="books">Books</button>
    </nav>

    <div class="status" id="status"></div>

    <section class="card" id="page-tracker">
      <div class="row">
        <label for="month">Month</label>
        <select id="month"></select>
        <span style="flex: 1"></span>
        <a class="btn ghost" href="/api/export" download>Export backup</a>
        <label class="btn ghost">Import backup<input id="import" type="file" accept=".json" hidden /></label>
      </div>
      <form class="row" id="item-form">
        <select id="item-category"></select>
        <input id="item-name" placeholder="Enter a new item..." required />
        <button class="btn" type="submit">Add item</button>
      </form>
      <div class="grid-wrap"><table class="tracker" id="tracker"></table></div>
    </section>

    <section class="stats-grid" id="page-stats" hidden>
      <div class="card">
        <h2 id="level-heading">Level</h2>
        <div class="bar"><div id="level-bar" style="width: 0%"></div></div>
        <p id="level-numbers"></p>
        <div class="milestones" id="milestones"></div>
      </div>
      <div class="card">
        <h2>Balance</h2>
        <svg id="radar" viewBox="0 0 320 320" role="img" aria-label="Category radar chart"></svg>
      </div>
      <div class="card">
        <h2>Categories</h2>
        <div id="categories"></div>
      </div>
      <div class="card">
        <h2>Quick overview</h2>
        <div class="overview" id="overview"></div>
      </div>
    </section>

    <section class="card" id="page-goals" hidden>
      <div class="row">
        <label for="grid-size">Grid size</label>
        <select id="grid-size">
          <option value="3">3x3</option>
          <option value="4">4x4</option>
          <option value="5">5x5</option>
        </select>
      </div>
      <div class="bingo" id="bingo"></div>
    </section>

    <section class="card" id="page-books" hidden>
      <form class="row" id="book-form">
        <input id="book-title" placeholder="Title" required />
        <input id="book-description" placeholder="Notes" />
        <select id="book-score">
          <option value="5">5</option><option value="4">4</option><option value="3">3</option>
          <option value="2">2</option><option value="1">1</option>
        </select>
        <input id="book-start" type="date" />
        <input id="book-end" type="date" />
        <button class="btn" type="submit" id="book-submit">Add book</button>
        <button class="btn ghost" type="button" id="book-cancel" hidden>Cancel</button>
      </form>
      <div class="row">
        <label for="book-sort">Sort</label>
        <select id="book-sort">
          <option value="date">Newest</option>
          <option value="score">Score</option>
          <option value="title">Title</option>
        </select>
        <label for="book-filter">Min score</label>
        <select id="book-filter">
          <option value="0">All</option><option value="2">2+</option><option value="3">3+</option>
          <option value="4">4+</option><option value="5">5</option>
        </select>
      </div>
      <div id="books"></div>
    </section>
  </main>

  <script>
    const CATEGORIES = ['Intelligence', 'Fitness', 'Creativity', 'Health', 'Social', 'Productivity'];
    const MONTHS = ['January', 'February', 'March', 'April', 'May', 'June', 'July',
      'August', 'September', 'October', 'November', 'December'];
    const $ = (id) => document.getElementById(id);
    const statusEl = $('status');
    let editingBook = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const escapeHtml = (value) => String(value)
      .replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;').replace(/"/g, '&quot;');

    const api = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: body === undefined ? {} : { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const fail = (err) => setStatus(err.message, 'error');

    // Tracker

    const loadTracker = async () => {
      const month = $('month').value;
      const view = await api('GET', `/api/tracker${month ? `?month=${month}` : ''}`);
      $('month').value = String(view.month);
      const head = view.dates
        .map((cell) => `<th class="${cell.is_today ? 'today' : ''}">${cell.date.slice(5)}</th>`)
        .join('');
      const rows = view.rows.map((row) => {
        const boxes = row.checked.map((checked, index) => {
          const cell = view.dates[index];
          return `<td class="${cell.is_today ? 'today' : ''}"><input type="checkbox" data-item="${row.id}" data-date="${cell.date}" ${checked ? 'checked' : ''} /></td>`;
        }).join('');
        return `<tr><td class="name">${escapeHtml(row.name)} <small>${row.category || '?'}</small> <button class="btn ghost" data-remove="${row.id}" title="Remove item">&times;</button></td>${boxes}</tr>`;
      }).join('');
      $('tracker').innerHTML = `<tr><th>Items</th>${head}</tr>${rows}`;
    };

    $('tracker').addEventListener('change', (event) => {
      const box = event.target;
      if (!box.dataset.item) {
        return;
      }
      api('POST', '/api/progress/toggle', { item_id: Number(box.dataset.item), date: box.dataset.date })
        .then((result) => { box.checked = result.completed; return refreshBadge(); })
        .catch(fail);
    });

    $('tracker').addEventListener('click', (event) => {
      const id = event.target.dataset.remove;
      if (id) {
        api('DELETE', `/api/items/${id}`).then(loadTracker).then(refreshBadge).catch(fail);
      }
    });

    $('item-form').addEventListener('submit', (event) => {
      event.preventDefault();
      api('POST', '/api/items', { name: $('item-name').value, category: $('item-category').value })
        .then(() => { $('item-name').value = ''; return loadTracker(); })
        .catch(fail);
    });

    $('month').addEventListener('change', () => loadTracker().catch(fail));

    $('import').addEventListener('change', async (event) => {
      const file = event.target.files[0];
      if (!file) {
        return;
      }
      try {
        const res = await fetch('/api/import', { method: 'POST', body: await file.text() });
        if (!res.ok) {
          throw new Error(await res.text());
        }
        setStatus('Data imported successfully! Your goals and progress have been restored.', 'ok');
        await loadTracker();
        await refreshBadge();
      } catch (err) {
        fail(err);
      }
      event.target.value = '';
    });

    // Stats

    const radarSvg = (points) => {
      const cx = 160, cy = 160, radius = 120;
      const at = (index, value) => {
        const angle = (Math.PI * 2 * index) / points.length - Math.PI / 2;
        return [cx + Math.cos(angle) * radius * value / 100, cy + Math.sin(angle) * radius * value / 100];
      };
      let rings = '';
      for (const step of [25, 50, 75, 100]) {
        const ring = points.map((_, i) => at(i, step).join(',')).join(' ');
        rings += `<polygon points="${ring}" fill="none" stroke="rgba(36,35,42,0.12)" />`;
      }
      const labels = points.map((point, i) => {
        const [x, y] = at(i, 118);
        return `<text x="${x}" y="${y}" font-size="11" text-anchor="middle" fill="${point.color}">${point.category}</text>`;
      }).join('');
      const shape = points.map((point, i) => at(i, point.value).join(',')).join(' ');
      return `${rings}<polygon points="${shape}" fill="rgba(139,92,246,0.25)" stroke="var(--accent)" stroke-width="2" />${labels}`;
    };

    const applyBadge = (level) => {
      $('badge-level').textContent = level.level;
      $('badge-tier').textContent = level.tier_name;
      $('badge-title').textContent = level.title;
      $('badge-xp').textContent = `${level.total_xp.toFixed(2)} XP`;
      document.documentElement.style.setProperty('--accent', level.tier_color);
    };

    const refreshBadge = async () => applyBadge((await api('GET', '/api/stats')).level);

    const loadStats = async () => {
      const stats = await api('GET', '/api/stats');
      const level = stats.level;
      applyBadge(level);
      $('level-heading').textContent = `Level ${level.level} · ${level.tier_name} · ${level.title}`;
      $('level-bar').style.width = `${level.progress * 100}%`;
      $('level-numbers').textContent = level.is_max_level
        ? 'Maximum level reached!'
        : `${level.current_level_xp.toFixed(2)} / ${level.next_level_xp.toFixed(2)} · ${level.xp_until_next.toFixed(2)} XP until next level`;
      $('milestones').innerHTML = stats.milestones
        .map((m) => `<span class="milestone" title="${escapeHtml(m.description)}">${m.icon} ${escapeHtml(m.name)}</span>`)
        .join('');
      $('radar').innerHTML = radarSvg(stats.radar);
      $('categories').innerHTML = CATEGORIES.map((name) => {
        const entry = stats.categories[name];
        return `<p><strong>${name}</strong> ${entry.achieved} / ${entry.total * 365} days · ${entry.percentage.toFixed(2)}%</p>
          <div class="bar"><div style="width: ${entry.percentage}%"></div></div>`;
      }).join('');
      const o = stats.overview;
      $('overview').innerHTML = `
        <div>Total goals<strong>${o.total_goals}</strong></div>
        <div>Categories active<strong>${o.categories_active}</strong></div>
        <div>Days tracked<strong>${o.days_tracked}</strong></div>
        <div>Completion rate<strong>${o.completion_rate}%</strong></div>`;
    };

    // Goals

    const loadGoals = async () => {
      const board = await api('GET', '/api/goals');
      $('grid-size').value = String(board.gridSize);
      $('bingo').style.gridTemplateColumns = `repeat(${board.gridSize}, 1fr)`;
      $('bingo').innerHTML = board.goals.map((goal, index) => {
        const checked = board.checkedGoals[index] ? 'checked' : '';
        return `<div class="cell ${checked}">
          <input data-goal="${index}" value="${escapeHtml(goal.text)}" placeholder="Add goal..." />
          <textarea data-details="${index}" placeholder="Details...">${escapeHtml(goal.details)}</textarea>
          <div class="row">
            <input type="checkbox" data-check="${index}" ${checked} />
            <button class="btn ghost" type="button" data-clear="${index}">Delete</button>
          </div>
        </div>`;
      }).join('');
    };

    $('bingo').addEventListener('change', (event) => {
      const el = event.target;
      let request = null;
      if (el.dataset.goal) {
        request = api('PUT', `/api/goals/${el.dataset.goal}`, { text: el.value });
      } else if (el.dataset.details) {
        request = api('PUT', `/api/goals/${el.dataset.details}`, { details: el.value });
      } else if (el.dataset.check) {
        request = api('POST', `/api/goals/${el.dataset.check}/toggle`).then(loadGoals);
      }
      if (request) {
        request.catch(fail);
      }
    });

    $('bingo').addEventListener('click', (event) => {
      const index = event.target.dataset.clear;
      if (index) {
        api('DELETE', `/api/goals/${index}`).then(loadGoals).catch(fail);
      }
    });

    $('grid-size').addEventListener('change', (event) => {
      api('PUT', '/api/goals/size', { size: Number(event.target.value) })
        .then(loadGoals)
        .catch((err) => { fail(err); return loadGoals(); });
    });

    // Books

    const resetBookForm = () => {
      editingBook = null;
      $('book-form').reset();
      $('book-submit').textContent = 'Add book';
      $('book-cancel').hidden = true;
    };

    const loadBooks = async () => {
      const books = await api('GET', `/api/books?sort=${$('book-sort').value}&min_score=${$('book-filter').value}`);
      $('books').innerHTML = books.map((book) => `
        <div class="book">
          <strong>${escapeHtml(book.title)}</strong>
          <span class="stars">${'★'.repeat(book.score)}${'☆'.repeat(5 - book.score)}</span>
          <span>${escapeHtml(book.description)}</span>
          <small>${book.startDate || 'No date'} → ${book.endDate || 'No date'}${book.readingDays === null ? '' : ` · ${book.readingDays} days`}</small>
          <div class="row">
            <button class="btn ghost" type="button" data-edit='${escapeHtml(JSON.stringify(book))}'>Edit</button>
            <button class="btn ghost" type="button" data-delete="${book.id}">Delete</button>
          </div>
        </div>`).join('') || '<p>No books yet.</p>';
    };

    $('book-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = {
        title: $('book-title').value,
        description: $('book-description').value,
        score: Number($('book-score').value),
        startDate: $('book-start').value || null,
        endDate: $('book-end').value || null
      };
      const request = editingBook
        ? api('PUT', `/api/books/${editingBook}`, form)
        : api('POST', '/api/books', form);
      request.then(() => { resetBookForm(); return loadBooks(); }).catch(fail);
    });

    $('book-cancel').addEventListener('click', resetBookForm);

    $('books').addEventListener('click', (event) => {
      const el = event.target;
      if (el.dataset.delete && window.confirm('Are you sure you want to delete this book?')) {
        api('DELETE', `/api/books/${el.dataset.delete}`).then(loadBooks).catch(fail);
      } else if (el.dataset.edit) {
        const book = JSON.parse(el.dataset.edit);
        editingBook = book.id;
        $('book-title').value = book.title;
        $('book-description').value = book.description;
        $('book-score').value = String(book.score);
        $('book-start').value = book.startDate || '';
        $('book-end').value = book.endDate || '';
        $('book-submit').textContent = 'Save book';
        $('book-cancel').hidden = false;
      }
    });

    $('book-sort').addEventListener('change', () => loadBooks().catch(fail));
    $('book-filter').addEventListener('change', () => loadBooks().catch(fail));

    // Navigation

    const pages = { tracker: loadTracker, stats: loadStats, goals: loadGoals, books: loadBooks };

    document.querySelectorAll('nav button').forEach((button) => {
      button.addEventListener('click', () => {
        document.querySelectorAll('nav button').forEach((b) => b.classList.toggle('active', b === button));
        Object.keys(pages).forEach((page) => { $(`page-${page}`).hidden = page !== button.dataset.page; });
        setStatus('', '');
        pages[button.dataset.page]().catch(fail);
      });
    });

    $('month').innerHTML = MONTHS.map((name, index) => `<option value="${index + 1}">${name}</option>`).join('');
    $('month').value = '';
    $('item-category').innerHTML = CATEGORIES.map((name) => `<option>${name}</option>`).join('');
    loadTracker().catch(fail);
  </script>
</body>
</html>
"##;
