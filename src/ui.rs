pub fn render_index(date: &str, taken_today: usize, total_today: usize) -> String {
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{TAKEN}}", &taken_today.to_string())
        .replace("{{TOTAL}}", &total_today.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Pill Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef6f1;
      --bg-2: #bfe3d0;
      --ink: #24312a;
      --accent: #2d9a6b;
      --accent-2: #2f4858;
      --missed: #e0744f;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4f2e9 60%, #f2f7ef 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      align-items: flex-start;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5a675f;
      font-size: 0.95rem;
    }

    .header-buttons {
      display: flex;
      gap: 8px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      font-family: inherit;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease, opacity 150ms ease;
    }

    button:active {
      transform: scale(0.97);
    }

    button:disabled {
      opacity: 0.45;
      cursor: default;
    }

    .btn-ghost {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .btn-undo {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.25);
    }

    .week-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .week-label {
      font-weight: 600;
      color: var(--accent-2);
    }

    .week-grid {
      display: grid;
      gap: 8px;
    }

    .day-row {
      display: grid;
      grid-template-columns: 120px 1fr;
      align-items: center;
      gap: 12px;
      padding: 8px 12px;
      border-radius: 16px;
      background: white;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .day-row.today {
      border-color: var(--accent);
      box-shadow: 0 0 0 2px rgba(45, 154, 107, 0.25);
    }

    .day-label {
      display: grid;
    }

    .day-label .weekday {
      font-weight: 600;
    }

    .day-label .date {
      font-size: 0.8rem;
      color: #7a847e;
    }

    .dose-cells {
      display: grid;
      grid-template-columns: repeat(4, 1fr);
      gap: 8px;
    }

    .dose-cell {
      height: 38px;
      border-radius: 12px;
      padding: 0;
      font-size: 0.75rem;
      letter-spacing: 0.04em;
    }

    .dose-cell.inactive {
      background: rgba(47, 72, 88, 0.05);
      color: transparent;
    }

    .dose-cell.done {
      background: var(--accent);
      color: white;
    }

    .dose-cell.missed {
      background: rgba(224, 116, 79, 0.16);
      color: var(--missed);
    }

    .dose-cell.future {
      background: rgba(47, 72, 88, 0.08);
      color: #7a847e;
    }

    .stats-panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(120px, 1fr));
      gap: 12px;
    }

    .stat {
      background: white;
      border-radius: 16px;
      padding: 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b958f;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.rate {
      color: var(--accent);
    }

    .status {
      font-size: 0.95rem;
      color: #5a675f;
      min-height: 1.2em;
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(36, 49, 42, 0.4);
      display: grid;
      place-items: center;
      padding: 18px;
    }

    .overlay.hidden {
      display: none;
    }

    .settings-card {
      width: min(360px, 100%);
      background: white;
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 16px;
      box-shadow: var(--shadow);
    }

    .settings-card h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .slot-btn {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
      text-align: left;
    }

    .slot-btn.active {
      background: var(--accent);
      color: white;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 24px 18px;
      }
      .day-row {
        grid-template-columns: 70px 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Pill Tracker</h1>
        <p class="subtitle">Today is {{DATE}} · {{TAKEN}} of {{TOTAL}} doses recorded.</p>
      </div>
      <div class="header-buttons">
        <button class="btn-undo" id="undo-btn" type="button" disabled>Undo</button>
        <button class="btn-ghost" id="settings-btn" type="button">Doses</button>
      </div>
    </header>

    <section class="week-nav">
      <button class="btn-ghost" id="prev-week" type="button">&larr; Week</button>
      <span class="week-label" id="week-label">&nbsp;</span>
      <div>
        <button class="btn-ghost" id="today-btn" type="button">Today</button>
        <button class="btn-ghost" id="next-week" type="button">Week &rarr;</button>
      </div>
    </section>

    <section class="week-grid" id="week-grid" aria-label="Week grid"></section>

    <section class="stats-panel">
      <div class="stat">
        <span class="label">Taken</span>
        <span class="value" id="stat-taken">0</span>
      </div>
      <div class="stat">
        <span class="label">Open</span>
        <span class="value" id="stat-open">0</span>
      </div>
      <div class="stat">
        <span class="label">Rate</span>
        <span class="value rate" id="stat-rate">0%</span>
      </div>
      <div class="stat">
        <span class="label">Streak</span>
        <span class="value" id="stat-streak">0</span>
      </div>
      <div class="stat">
        <span class="label">Best streak</span>
        <span class="value" id="stat-best">0</span>
      </div>
    </section>

    <div class="status" id="status">&nbsp;</div>
  </main>

  <div class="overlay hidden" id="settings-overlay">
    <div class="settings-card">
      <h2>Daily doses</h2>
      <button class="slot-btn" type="button" data-slot="0">Morning</button>
      <button class="slot-btn" type="button" data-slot="1">Noon</button>
      <button class="slot-btn" type="button" data-slot="2">Evening</button>
      <button class="slot-btn" type="button" data-slot="3">Night</button>
      <button class="btn-ghost" id="close-settings" type="button">Done</button>
    </div>
  </div>

  <script>
    const weekGrid = document.getElementById('week-grid');
    const weekLabel = document.getElementById('week-label');
    const statusEl = document.getElementById('status');
    const undoBtn = document.getElementById('undo-btn');
    const settingsBtn = document.getElementById('settings-btn');
    const settingsOverlay = document.getElementById('settings-overlay');
    const closeSettings = document.getElementById('close-settings');
    const slotBtns = Array.from(document.querySelectorAll('.slot-btn'));
    const statTaken = document.getElementById('stat-taken');
    const statOpen = document.getElementById('stat-open');
    const statRate = document.getElementById('stat-rate');
    const statStreak = document.getElementById('stat-streak');
    const statBest = document.getElementById('stat-best');

    let weekStart = null;
    let pattern = [true, false, false, false];

    const shiftDate = (iso, days) => {
      const d = new Date(`${iso}T00:00:00`);
      d.setDate(d.getDate() + days);
      const y = d.getFullYear();
      const m = String(d.getMonth() + 1).padStart(2, '0');
      const day = String(d.getDate()).padStart(2, '0');
      return `${y}-${m}-${day}`;
    };

    const setStatus = (message) => {
      statusEl.textContent = message || ' ';
    };

    const renderWeek = (week) => {
      weekStart = week.start_date;
      weekLabel.textContent = `${week.week} · ${week.start_date} – ${week.end_date}`;
      undoBtn.disabled = !week.can_undo;
      weekGrid.innerHTML = '';

      for (const day of week.days) {
        const row = document.createElement('div');
        row.className = `day-row${day.is_today ? ' today' : ''}`;

        const label = document.createElement('div');
        label.className = 'day-label';
        label.innerHTML = `<span class="weekday">${day.weekday}</span><span class="date">${day.date}</span>`;
        row.appendChild(label);

        const cells = document.createElement('div');
        cells.className = 'dose-cells';

        for (const slot of day.slots) {
          const cell = document.createElement('button');
          cell.type = 'button';

          if (!slot.active) {
            cell.className = 'dose-cell inactive';
            cell.disabled = true;
          } else if (slot.taken) {
            cell.className = 'dose-cell done';
            cell.textContent = '✓';
          } else if (day.is_future) {
            cell.className = 'dose-cell future';
            cell.textContent = slot.name;
          } else {
            cell.className = 'dose-cell missed';
            cell.textContent = slot.name;
          }

          cell.setAttribute('aria-label', `${day.weekday} ${day.date}, ${slot.name}`);
          if (slot.active) {
            cell.addEventListener('click', () => toggleDose(day.date, slot.slot));
          }
          cells.appendChild(cell);
        }

        row.appendChild(cells);
        weekGrid.appendChild(row);
      }

      updateStatusLine(week);
    };

    const updateStatusLine = (week) => {
      const today = week.days.find((day) => day.is_today);
      if (!today) {
        setStatus('');
        return;
      }
      const active = today.slots.filter((slot) => slot.active);
      const taken = active.filter((slot) => slot.taken).length;
      if (active.length === 0) {
        setStatus('No doses configured.');
      } else if (taken === active.length) {
        setStatus('All doses recorded today ✓');
      } else if (taken > 0) {
        setStatus(`Today ${taken} of ${active.length} recorded.`);
      } else {
        setStatus('Stored locally on this machine.');
      }
    };

    const renderStats = (stats) => {
      statTaken.textContent = stats.month.taken;
      statOpen.textContent = stats.month.open;
      statRate.textContent = `${stats.month.rate_percent}%`;
      statStreak.textContent = stats.streaks.current;
      statBest.textContent = stats.streaks.best;
    };

    const loadWeek = async (start) => {
      const url = start ? `/api/week?start=${start}` : '/api/week';
      const res = await fetch(url);
      if (!res.ok) {
        throw new Error('Unable to load week');
      }
      renderWeek(await res.json());
    };

    const loadStats = async () => {
      const res = await fetch('/api/stats');
      if (!res.ok) {
        throw new Error('Unable to load stats');
      }
      renderStats(await res.json());
    };

    const loadPattern = async () => {
      const res = await fetch('/api/pattern');
      if (!res.ok) {
        throw new Error('Unable to load dose pattern');
      }
      const data = await res.json();
      pattern = data.slots;
      syncSlotButtons();
    };

    const refresh = async (start) => {
      await Promise.all([loadWeek(start), loadStats()]);
    };

    const toggleDose = async (date, slot) => {
      const res = await fetch('/api/toggle', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ date, slot })
      });
      if (!res.ok) {
        setStatus(await res.text() || 'Request failed');
        return;
      }
      await refresh(weekStart);
    };

    const undoLast = async () => {
      const res = await fetch('/api/undo', { method: 'POST' });
      if (!res.ok) {
        setStatus('Undo failed');
        return;
      }
      const data = await res.json();
      undoBtn.disabled = !data.can_undo;
      await refresh(weekStart);
    };

    const syncSlotButtons = () => {
      slotBtns.forEach((btn) => {
        const idx = Number(btn.dataset.slot);
        btn.classList.toggle('active', !!pattern[idx]);
      });
    };

    const savePattern = async () => {
      const res = await fetch('/api/pattern', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ slots: pattern })
      });
      if (!res.ok) {
        setStatus('Unable to save dose pattern');
        return;
      }
      const data = await res.json();
      pattern = data.slots;
      syncSlotButtons();
      await refresh(weekStart);
    };

    slotBtns.forEach((btn) => {
      btn.addEventListener('click', () => {
        const idx = Number(btn.dataset.slot);
        pattern[idx] = !pattern[idx];
        syncSlotButtons();
        savePattern().catch((err) => setStatus(err.message));
      });
    });

    document.getElementById('prev-week').addEventListener('click', () => {
      refresh(shiftDate(weekStart, -7)).catch((err) => setStatus(err.message));
    });

    document.getElementById('next-week').addEventListener('click', () => {
      refresh(shiftDate(weekStart, 7)).catch((err) => setStatus(err.message));
    });

    document.getElementById('today-btn').addEventListener('click', () => {
      refresh(null).catch((err) => setStatus(err.message));
    });

    undoBtn.addEventListener('click', () => {
      undoLast().catch((err) => setStatus(err.message));
    });

    settingsBtn.addEventListener('click', () => {
      settingsOverlay.classList.remove('hidden');
      syncSlotButtons();
    });

    closeSettings.addEventListener('click', () => {
      settingsOverlay.classList.add('hidden');
    });

    settingsOverlay.addEventListener('click', (event) => {
      if (event.target === settingsOverlay) {
        settingsOverlay.classList.add('hidden');
      }
    });

    Promise.all([refresh(null), loadPattern()]).catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;
